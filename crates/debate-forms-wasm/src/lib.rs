//! Debate Forms WASM
//!
//! Browser bindings for the registration page: the validators as plain
//! functions, and a `RegistrationApp` that wires the controller and admin
//! panel to `localStorage`, Blob downloads and page objects written in JS.

pub mod download;
pub mod logging;
pub mod storage;
pub mod surface;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use debate_forms::{
    AdminPanel, Config, ExportError, ExportFormat, FieldId, FormController, FormEvent, KeyPress,
    StorageGateway, SystemClock,
};
use debate_forms_validation as core;
use serde::Deserialize;
use tracing::{debug, error, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::download::BlobDownload;
use crate::storage::LocalStore;
use crate::surface::{JsAdminSurface, JsFormSurface, JsNotifier, PageAdmin, PageForm, PageNotifier};

/// Panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(Level::INFO);
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    core::validate_email(email)
}

#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone(phone: &str) -> bool {
    core::validate_phone(phone)
}

/// Trimmed length is at least `min` characters
#[wasm_bindgen(js_name = validateTextLength)]
pub fn validate_text_length(text: &str, min: usize) -> bool {
    core::validate_text_length(text, min)
}

#[wasm_bindgen(js_name = validateInterests)]
pub fn validate_interests(selected_count: usize) -> bool {
    core::validate_interests(selected_count)
}

/// A DOM event as forwarded by the page
///
/// ```javascript
/// app.handleEvent({ type: e.type, field: e.target.name || e.target.id, key: e.key,
///                   ctrlKey: e.ctrlKey, metaKey: e.metaKey });
/// ```
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UiEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
}

impl UiEvent {
    /// `Ok(None)` for events on controls the form does not know about
    pub fn into_form_event(self) -> Result<Option<FormEvent>, String> {
        let event = match self.kind.as_str() {
            "input" | "change" | "blur" | "focusout" => {
                let Some(name) = self.field.as_deref() else {
                    return Err(format!("'{}' event without a field", self.kind));
                };
                let Ok(field) = name.parse::<FieldId>() else {
                    return Ok(None);
                };
                match self.kind.as_str() {
                    "input" => FormEvent::Input(field),
                    "change" => FormEvent::Change(field),
                    _ => FormEvent::Blur(field),
                }
            }
            "submit" => FormEvent::Submit,
            "keydown" => FormEvent::KeyDown(KeyPress {
                key: self.key.unwrap_or_default(),
                ctrl: self.ctrl_key,
                meta: self.meta_key,
            }),
            "closeConfirmation" => FormEvent::CloseConfirmation,
            "backdropClick" => FormEvent::BackdropClick,
            other => return Err(format!("unknown event type '{}'", other)),
        };
        Ok(Some(event))
    }
}

struct App {
    controller: FormController,
    form: PageForm,
    notifier: PageNotifier,
    admin: PageAdmin,
    panel: AdminPanel,
    gateway: StorageGateway<LocalStore>,
    sink: BlobDownload,
}

/// The registration page, driven by forwarded DOM events
#[wasm_bindgen]
pub struct RegistrationApp {
    inner: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl RegistrationApp {
    /// `config` is optional TOML text with the same sections as `debate-forms.toml`
    #[wasm_bindgen(constructor)]
    pub fn new(
        form: JsFormSurface,
        notifier: JsNotifier,
        admin: JsAdminSurface,
        config: Option<String>,
    ) -> Result<RegistrationApp, JsValue> {
        let config = match config {
            Some(text) => Config::from_toml_str(&text)
                .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {:#}", e)))?,
            None => Config::default(),
        };

        let store = LocalStore::open();
        if store.is_none() {
            warn!("localStorage is not available, registrations cannot be saved");
        }

        let mut form = PageForm(form);
        let controller = FormController::new(&config, &mut form);

        Ok(RegistrationApp {
            inner: Rc::new(RefCell::new(App {
                controller,
                form,
                notifier: PageNotifier(notifier),
                admin: PageAdmin(admin),
                panel: AdminPanel::new(&config),
                gateway: StorageGateway::new(store, &config),
                sink: BlobDownload,
            })),
        })
    }

    /// Returns `true` when the page should call `preventDefault()`
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&self, event: JsValue) -> Result<bool, JsValue> {
        let event: UiEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse event: {}", e)))?;
        let Some(event) = event.into_form_event().map_err(|e| JsValue::from_str(&e))? else {
            return Ok(false);
        };

        let outcome = self.with_app(|app| {
            app.controller
                .handle_event(event, &mut app.form, &mut app.notifier)
        })?;

        if let Some(delay) = outcome.pending_delay() {
            schedule_finish(Rc::clone(&self.inner), delay)?;
        }
        Ok(outcome.prevent_default())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, JsValue> {
        self.with_app(|app| {
            app.panel
                .authenticate(
                    username,
                    password,
                    &app.gateway,
                    &mut app.admin,
                    &mut app.notifier,
                )
                .is_ok()
        })
    }

    #[wasm_bindgen(js_name = toggleAdminPanel)]
    pub fn toggle_admin_panel(&self) -> Result<(), JsValue> {
        self.with_app(|app| app.panel.toggle_panel(&mut app.admin))
    }

    #[wasm_bindgen(js_name = showAdminLogin)]
    pub fn show_admin_login(&self) -> Result<(), JsValue> {
        self.with_app(|app| app.panel.show_login(&mut app.admin))
    }

    #[wasm_bindgen(js_name = closeAdminLogin)]
    pub fn close_admin_login(&self) -> Result<(), JsValue> {
        self.with_app(|app| app.panel.close_login(&mut app.admin))
    }

    /// `"csv"` or `"json"` (default); resolves to the number of exported records
    ///
    /// A missing login or an empty store is reported on the page and yields 0.
    #[wasm_bindgen(js_name = exportResponses)]
    pub fn export_responses(&self, format: Option<String>) -> Result<usize, JsValue> {
        let format = match format {
            Some(name) => name
                .parse::<ExportFormat>()
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => ExportFormat::default(),
        };

        let result = self.with_app(|app| {
            app.panel.export(
                format,
                &app.gateway,
                &mut app.admin,
                &mut app.notifier,
                &mut app.sink,
                &SystemClock,
            )
        })?;

        match result {
            Ok(count) => Ok(count),
            Err(ExportError::NotAuthenticated | ExportError::Empty) => Ok(0),
            Err(err) => Err(JsValue::from_str(&err.to_string())),
        }
    }

    /// Refreshes the admin panel counter and returns it
    #[wasm_bindgen(js_name = responsesCount)]
    pub fn responses_count(&self) -> Result<usize, JsValue> {
        self.with_app(|app| app.panel.refresh_count(&app.gateway, &mut app.admin))
    }

    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) -> Result<bool, JsValue> {
        self.with_app(|app| {
            app.controller
                .handle_event(FormEvent::CloseConfirmation, &mut app.form, &mut app.notifier)
                .prevent_default()
        })
    }
}

impl RegistrationApp {
    fn with_app<R>(&self, f: impl FnOnce(&mut App) -> R) -> Result<R, JsValue> {
        let mut app = self
            .inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("RegistrationApp is already handling an event"))?;
        Ok(f(&mut app))
    }
}

/// Store the pending submission once the simulated round-trip has elapsed
fn schedule_finish(inner: Rc<RefCell<App>>, delay: Duration) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

    let callback = Closure::once_into_js(move || {
        let Ok(mut app) = inner.try_borrow_mut() else {
            error!("submission timer fired while the app was busy");
            return;
        };
        let App {
            controller,
            form,
            notifier,
            gateway,
            ..
        } = &mut *app;

        match controller.finish_submission(form, notifier, gateway, &SystemClock) {
            Ok(id) => debug!(registration_id = %id, "submission finished"),
            Err(err) => warn!(error = %err, "submission was not stored"),
        }
    });

    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        timeout,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn event(kind: &str, field: Option<&str>) -> UiEvent {
        UiEvent {
            kind: kind.to_string(),
            field: field.map(str::to_string),
            key: None,
            ctrl_key: false,
            meta_key: false,
        }
    }

    #[wasm_bindgen_test]
    fn exported_validators() {
        assert!(validate_email("asha@example.edu"));
        assert!(!validate_email("asha@example"));
        assert!(validate_phone("+91 98765 43210"));
        assert!(!validate_phone("12345"));
        assert!(validate_text_length(&"a".repeat(50), 50));
        assert!(!validate_text_length("  short  ", 50));
        assert!(validate_interests(1));
        assert!(!validate_interests(0));
    }

    #[wasm_bindgen_test]
    fn field_events_map_to_form_events() {
        assert_eq!(
            event("input", Some("email")).into_form_event(),
            Ok(Some(FormEvent::Input(FieldId::Email)))
        );
        assert_eq!(
            event("focusout", Some("phone")).into_form_event(),
            Ok(Some(FormEvent::Blur(FieldId::Phone)))
        );
        assert_eq!(
            event("change", Some("teamPreference")).into_form_event(),
            Ok(Some(FormEvent::Change(FieldId::TeamPreference)))
        );
        // Controls outside the registration form
        assert_eq!(event("input", Some("adminUsername")).into_form_event(), Ok(None));
        assert!(event("input", None).into_form_event().is_err());
        assert!(event("wheel", None).into_form_event().is_err());
    }

    #[wasm_bindgen_test]
    fn submit_shortcut_keeps_modifiers() {
        let mut shortcut = event("keydown", None);
        shortcut.key = Some("Enter".to_string());
        shortcut.meta_key = true;

        let Ok(Some(FormEvent::KeyDown(key))) = shortcut.into_form_event() else {
            panic!("keydown should map to a key press");
        };
        assert!(key.is_submit_shortcut());
    }
}
