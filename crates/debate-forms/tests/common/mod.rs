// Shared fakes for the integration tests
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use debate_forms::{
    AdminSurface, CharacterCounter, ExportFile, FieldId, FieldMark, FileSink, FormSurface,
    KeyValueStore, Notification, Notifier, Progress, RegistrationId, StoreError, Submission,
    TeamPreference,
};

/// In-memory stand-in for the rendered registration form
#[derive(Debug, Default)]
pub struct FakeForm {
    pub values: BTreeMap<FieldId, String>,
    pub checked: BTreeSet<FieldId>,
    pub interests: Vec<String>,
    pub required: BTreeMap<FieldId, bool>,
    pub marks: BTreeMap<FieldId, FieldMark>,
    pub error_messages: BTreeMap<FieldId, String>,
    pub visible_errors: BTreeSet<FieldId>,
    pub partner_visible: bool,
    pub scrolled_to: Vec<FieldId>,
    pub loading: bool,
    pub submit_enabled: bool,
    pub counter: Option<CharacterCounter>,
    pub progress: Option<Progress>,
    pub resets: usize,
}

impl FakeForm {
    pub fn new() -> Self {
        Self {
            submit_enabled: true,
            ..Self::default()
        }
    }

    /// Every required field filled with valid data
    pub fn filled() -> Self {
        let mut form = Self::new();
        form.set(FieldId::FullName, "Asha Rao");
        form.set(FieldId::Email, "asha@example.edu");
        form.set(FieldId::Phone, "+91 98765 43210");
        form.set(FieldId::RollNumber, "21CS042");
        form.set(FieldId::Batch, "2021");
        form.set(FieldId::Branch, "CSE");
        form.set(FieldId::Semester, "6");
        form.set(FieldId::Experience, "Intermediate");
        form.set(FieldId::TeamPreference, "Solo");
        form.set(FieldId::PreferredRole, "Speaker");
        form.interests = vec!["Policy".to_string(), "Parli".to_string()];
        form.checked.insert(FieldId::Agreement);
        form
    }

    pub fn set(&mut self, field: FieldId, value: &str) {
        self.values.insert(field, value.to_string());
    }

    pub fn check(&mut self, field: FieldId, checked: bool) {
        if checked {
            self.checked.insert(field);
        } else {
            self.checked.remove(&field);
        }
    }

    pub fn error_visible(&self, field: FieldId) -> bool {
        self.visible_errors.contains(&field)
    }

    pub fn is_required(&self, field: FieldId) -> bool {
        self.required.get(&field).copied().unwrap_or(false)
    }
}

impl FormSurface for FakeForm {
    fn value(&self, field: FieldId) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: FieldId, value: &str) {
        self.set(field, value);
    }

    fn is_checked(&self, field: FieldId) -> bool {
        self.checked.contains(&field)
    }

    fn selected_interests(&self) -> Vec<String> {
        self.interests.clone()
    }

    fn set_required(&mut self, field: FieldId, required: bool) {
        self.required.insert(field, required);
    }

    fn mark(&self, field: FieldId) -> FieldMark {
        self.marks.get(&field).copied().unwrap_or_default()
    }

    fn set_mark(&mut self, field: FieldId, mark: FieldMark) {
        self.marks.insert(field, mark);
    }

    fn attach_error(&mut self, field: FieldId, message: &str) {
        self.error_messages.insert(field, message.to_string());
    }

    fn set_error_visible(&mut self, field: FieldId, visible: bool) {
        if visible {
            self.visible_errors.insert(field);
        } else {
            self.visible_errors.remove(&field);
        }
    }

    fn set_partner_section_visible(&mut self, visible: bool) {
        self.partner_visible = visible;
    }

    fn scroll_into_view(&mut self, field: FieldId) {
        self.scrolled_to.push(field);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_counter(&mut self, counter: &CharacterCounter) {
        self.counter = Some(counter.clone());
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.progress = Some(progress.clone());
    }

    fn reset(&mut self) {
        self.values.clear();
        self.checked.clear();
        self.interests.clear();
        self.resets += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeNotifier {
    pub notifications: Vec<Notification>,
    pub alerts: Vec<String>,
    pub confirmation: Option<RegistrationId>,
}

impl Notifier for FakeNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show_confirmation(&mut self, id: &RegistrationId) {
        self.confirmation = Some(id.clone());
    }

    fn close_confirmation(&mut self) {
        self.confirmation = None;
    }

    fn is_confirmation_open(&self) -> bool {
        self.confirmation.is_some()
    }
}

#[derive(Debug, Default)]
pub struct FakeAdmin {
    pub login_open: bool,
    pub login_prompts: usize,
    pub login_errors: Vec<(String, Duration)>,
    pub panel_shown: bool,
    pub collapsed: bool,
    pub responses_count: Option<usize>,
}

impl AdminSurface for FakeAdmin {
    fn show_login(&mut self) {
        self.login_open = true;
        self.login_prompts += 1;
    }

    fn close_login(&mut self) {
        self.login_open = false;
    }

    fn show_login_error(&mut self, message: &str, duration: Duration) {
        self.login_errors.push((message.to_string(), duration));
    }

    fn show_panel(&mut self) {
        self.panel_shown = true;
    }

    fn toggle_panel_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    fn set_responses_count(&mut self, count: usize) {
        self.responses_count = Some(count);
    }
}

#[derive(Debug, Default)]
pub struct FakeSink {
    pub files: Vec<ExportFile>,
}

impl FileSink for FakeSink {
    fn save_file(&mut self, file: &ExportFile) -> Result<(), String> {
        self.files.push(file.clone());
        Ok(())
    }
}

/// Store whose writes are accepted but never land
#[derive(Debug, Default)]
pub struct BlackHoleStore;

impl KeyValueStore for BlackHoleStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}

/// Store that rejects writes like a full `localStorage`
#[derive(Debug, Default)]
pub struct QuotaExceededStore;

impl KeyValueStore for QuotaExceededStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError("QuotaExceededError".to_string()))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}

pub fn instant(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

pub fn submission(name: &str, timestamp: DateTime<Utc>) -> Submission {
    Submission {
        full_name: name.to_string(),
        email: format!("{}@example.edu", name.to_lowercase()),
        phone: "+919876543210".to_string(),
        roll_number: "21CS042".to_string(),
        batch: "2021".to_string(),
        branch: "CSE".to_string(),
        semester: "6".to_string(),
        experience: "Beginner".to_string(),
        interests: vec!["Policy".to_string(), "Parli".to_string()],
        motivation: None,
        team_preference: TeamPreference::Solo,
        partner_name: None,
        preferred_role: "Speaker".to_string(),
        achievements: None,
        special_requirements: None,
        newsletter: false,
        timestamp,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
