//! Page objects written in JavaScript, seen through the core surface traits.
//!
//! The page passes three plain objects to `RegistrationApp`; field arguments
//! are the control ids (`fullName`, `email`, ...) and marks are the strings
//! `"neutral"`, `"valid"` and `"invalid"`.

use std::time::Duration;

use debate_forms::{
    AdminSurface, CharacterCounter, CounterTone, FieldId, FieldMark, FormSurface, Notification,
    NotificationLevel, Notifier, Progress, RegistrationId,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type JsFormSurface;

    #[wasm_bindgen(method)]
    fn value(this: &JsFormSurface, field: &str) -> String;
    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &JsFormSurface, field: &str, value: &str);
    #[wasm_bindgen(method, js_name = isChecked)]
    fn is_checked(this: &JsFormSurface, field: &str) -> bool;
    #[wasm_bindgen(method, js_name = selectedInterests)]
    fn selected_interests(this: &JsFormSurface) -> Array;
    #[wasm_bindgen(method, js_name = setRequired)]
    fn set_required(this: &JsFormSurface, field: &str, required: bool);
    #[wasm_bindgen(method)]
    fn mark(this: &JsFormSurface, field: &str) -> String;
    #[wasm_bindgen(method, js_name = setMark)]
    fn set_mark(this: &JsFormSurface, field: &str, mark: &str);
    #[wasm_bindgen(method, js_name = attachError)]
    fn attach_error(this: &JsFormSurface, field: &str, message: &str);
    #[wasm_bindgen(method, js_name = setErrorVisible)]
    fn set_error_visible(this: &JsFormSurface, field: &str, visible: bool);
    #[wasm_bindgen(method, js_name = setPartnerSectionVisible)]
    fn set_partner_section_visible(this: &JsFormSurface, visible: bool);
    #[wasm_bindgen(method, js_name = scrollIntoView)]
    fn scroll_into_view(this: &JsFormSurface, field: &str);
    #[wasm_bindgen(method, js_name = setLoading)]
    fn set_loading(this: &JsFormSurface, loading: bool);
    #[wasm_bindgen(method, js_name = setSubmitEnabled)]
    fn set_submit_enabled(this: &JsFormSurface, enabled: bool);
    #[wasm_bindgen(method, js_name = setCounter)]
    fn set_counter(this: &JsFormSurface, text: &str, short: bool);
    #[wasm_bindgen(method, js_name = setProgress)]
    fn set_progress(this: &JsFormSurface, percent: u8, label: &str);
    #[wasm_bindgen(method)]
    fn reset(this: &JsFormSurface);

    pub type JsNotifier;

    #[wasm_bindgen(method)]
    fn notify(this: &JsNotifier, message: &str, level: &str, duration_ms: u32);
    #[wasm_bindgen(method)]
    fn alert(this: &JsNotifier, message: &str);
    #[wasm_bindgen(method, js_name = showConfirmation)]
    fn show_confirmation(this: &JsNotifier, registration_id: &str);
    #[wasm_bindgen(method, js_name = closeConfirmation)]
    fn close_confirmation(this: &JsNotifier);
    #[wasm_bindgen(method, js_name = isConfirmationOpen)]
    fn is_confirmation_open(this: &JsNotifier) -> bool;

    pub type JsAdminSurface;

    #[wasm_bindgen(method, js_name = showLogin)]
    fn show_login(this: &JsAdminSurface);
    #[wasm_bindgen(method, js_name = closeLogin)]
    fn close_login(this: &JsAdminSurface);
    #[wasm_bindgen(method, js_name = showLoginError)]
    fn show_login_error(this: &JsAdminSurface, message: &str, duration_ms: u32);
    #[wasm_bindgen(method, js_name = showPanel)]
    fn show_panel(this: &JsAdminSurface);
    #[wasm_bindgen(method, js_name = togglePanelCollapsed)]
    fn toggle_panel_collapsed(this: &JsAdminSurface);
    #[wasm_bindgen(method, js_name = setResponsesCount)]
    fn set_responses_count(this: &JsAdminSurface, count: u32);
}

pub fn mark_name(mark: FieldMark) -> &'static str {
    match mark {
        FieldMark::Neutral => "neutral",
        FieldMark::Valid => "valid",
        FieldMark::Invalid => "invalid",
    }
}

pub fn parse_mark(name: &str) -> FieldMark {
    match name {
        "valid" => FieldMark::Valid,
        "invalid" => FieldMark::Invalid,
        _ => FieldMark::Neutral,
    }
}

pub fn level_name(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "info",
        NotificationLevel::Success => "success",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Error => "error",
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

pub struct PageForm(pub JsFormSurface);

impl FormSurface for PageForm {
    fn value(&self, field: FieldId) -> String {
        self.0.value(field.name())
    }

    fn set_value(&mut self, field: FieldId, value: &str) {
        self.0.set_value(field.name(), value);
    }

    fn is_checked(&self, field: FieldId) -> bool {
        self.0.is_checked(field.name())
    }

    fn selected_interests(&self) -> Vec<String> {
        self.0
            .selected_interests()
            .iter()
            .filter_map(|value| value.as_string())
            .collect()
    }

    fn set_required(&mut self, field: FieldId, required: bool) {
        self.0.set_required(field.name(), required);
    }

    fn mark(&self, field: FieldId) -> FieldMark {
        parse_mark(&self.0.mark(field.name()))
    }

    fn set_mark(&mut self, field: FieldId, mark: FieldMark) {
        self.0.set_mark(field.name(), mark_name(mark));
    }

    fn attach_error(&mut self, field: FieldId, message: &str) {
        self.0.attach_error(field.name(), message);
    }

    fn set_error_visible(&mut self, field: FieldId, visible: bool) {
        self.0.set_error_visible(field.name(), visible);
    }

    fn set_partner_section_visible(&mut self, visible: bool) {
        self.0.set_partner_section_visible(visible);
    }

    fn scroll_into_view(&mut self, field: FieldId) {
        self.0.scroll_into_view(field.name());
    }

    fn set_loading(&mut self, loading: bool) {
        self.0.set_loading(loading);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.0.set_submit_enabled(enabled);
    }

    fn set_counter(&mut self, counter: &CharacterCounter) {
        self.0
            .set_counter(&counter.to_string(), counter.tone == CounterTone::Short);
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.0.set_progress(progress.percent, &progress.label());
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

pub struct PageNotifier(pub JsNotifier);

impl Notifier for PageNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.0.notify(
            &notification.message,
            level_name(notification.level),
            millis(notification.duration),
        );
    }

    fn alert(&mut self, message: &str) {
        self.0.alert(message);
    }

    fn show_confirmation(&mut self, id: &RegistrationId) {
        self.0.show_confirmation(id.as_str());
    }

    fn close_confirmation(&mut self) {
        self.0.close_confirmation();
    }

    fn is_confirmation_open(&self) -> bool {
        self.0.is_confirmation_open()
    }
}

pub struct PageAdmin(pub JsAdminSurface);

impl AdminSurface for PageAdmin {
    fn show_login(&mut self) {
        self.0.show_login();
    }

    fn close_login(&mut self) {
        self.0.close_login();
    }

    fn show_login_error(&mut self, message: &str, duration: Duration) {
        self.0.show_login_error(message, millis(duration));
    }

    fn show_panel(&mut self) {
        self.0.show_panel();
    }

    fn toggle_panel_collapsed(&mut self) {
        self.0.toggle_panel_collapsed();
    }

    fn set_responses_count(&mut self, count: usize) {
        self.0
            .set_responses_count(u32::try_from(count).unwrap_or(u32::MAX));
    }
}
