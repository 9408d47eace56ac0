//! UI collaborators driven by the controller and the admin panel.
//!
//! The page (DOM glue in the browser, fakes in tests) implements these traits
//! and forwards its "on change" notifications as [`FormEvent`]s. Nothing in
//! the core crate reaches into the page on its own.

use std::fmt;
use std::time::Duration;

use crate::export::ExportFile;
use crate::form::{FieldId, FieldMark};
use crate::model::RegistrationId;

/// The registration form as rendered on the page
pub trait FormSurface {
    /// Current value of a text, textarea or select control
    fn value(&self, field: FieldId) -> String;

    fn set_value(&mut self, field: FieldId, value: &str);

    /// Checked state of a single checkbox
    fn is_checked(&self, field: FieldId) -> bool;

    /// Values of the checked interest boxes, in page order
    fn selected_interests(&self) -> Vec<String>;

    fn set_required(&mut self, field: FieldId, required: bool);

    fn mark(&self, field: FieldId) -> FieldMark;

    fn set_mark(&mut self, field: FieldId, mark: FieldMark);

    /// Creates the field's inline error element, hidden
    fn attach_error(&mut self, field: FieldId, message: &str);

    fn set_error_visible(&mut self, field: FieldId, visible: bool);

    fn set_partner_section_visible(&mut self, visible: bool);

    /// Smooth-scroll the control to the middle of the viewport
    fn scroll_into_view(&mut self, field: FieldId);

    fn set_loading(&mut self, loading: bool);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_counter(&mut self, counter: &CharacterCounter);

    fn set_progress(&mut self, progress: &Progress);

    /// Restore every control to its initial value
    fn reset(&mut self);
}

/// Confirmation modal, blocking alerts and toast notifications
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);

    fn alert(&mut self, message: &str);

    fn show_confirmation(&mut self, id: &RegistrationId);

    fn close_confirmation(&mut self);

    fn is_confirmation_open(&self) -> bool;
}

/// Admin login modal and collapsible admin panel
pub trait AdminSurface {
    fn show_login(&mut self);

    fn close_login(&mut self);

    /// Show the inline login error and hide it again after `duration`
    fn show_login_error(&mut self, message: &str, duration: Duration);

    fn show_panel(&mut self);

    fn toggle_panel_collapsed(&mut self);

    fn set_responses_count(&mut self, count: usize);
}

/// Client-side "save as" for exported data
pub trait FileSink {
    fn save_file(&mut self, file: &ExportFile) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient toast shown in the corner of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    /// Empty, or past the minimum
    Ok,
    /// Started but still under the minimum
    Short,
}

/// Live character counter under the motivation field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCounter {
    pub length: usize,
    pub display_max: usize,
    pub tone: CounterTone,
}

impl CharacterCounter {
    pub fn new(text: &str, min: usize, display_max: usize) -> Self {
        let length = text.chars().count();
        let tone = if length == 0 || length >= min {
            CounterTone::Ok
        } else {
            CounterTone::Short
        };
        Self {
            length,
            display_max,
            tone,
        }
    }
}

impl fmt::Display for CharacterCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} characters (optional)", self.length, self.display_max)
    }
}

/// Share of required fields that are filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub filled: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn new(filled: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((filled as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            filled,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    pub fn label(&self) -> String {
        if self.is_complete() {
            "✓ Form Complete - Ready to Submit!".to_string()
        } else {
            format!("Form Progress: {}%", self.percent)
        }
    }
}

/// A key press forwarded from the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+Enter, or Cmd+Enter on macOS
    pub fn is_submit_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "Enter"
    }
}

/// Notifications the page forwards to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input(FieldId),
    Change(FieldId),
    Blur(FieldId),
    Submit,
    KeyDown(KeyPress),
    CloseConfirmation,
    /// Click on the dimmed area around the confirmation modal
    BackdropClick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_text_and_tone() {
        let empty = CharacterCounter::new("", 50, 500);
        assert_eq!(empty.to_string(), "0/500 characters (optional)");
        assert_eq!(empty.tone, CounterTone::Ok);

        let short = CharacterCounter::new("I like debating.", 50, 500);
        assert_eq!(short.length, 16);
        assert_eq!(short.tone, CounterTone::Short);

        let long = CharacterCounter::new(&"a".repeat(600), 50, 500);
        assert_eq!(long.to_string(), "600/500 characters (optional)");
        assert_eq!(long.tone, CounterTone::Ok);
    }

    #[test]
    fn test_progress_rounding_and_label() {
        let progress = Progress::new(1, 3);
        assert_eq!(progress.percent, 33);
        assert_eq!(progress.label(), "Form Progress: 33%");

        let progress = Progress::new(2, 3);
        assert_eq!(progress.percent, 67);

        let done = Progress::new(11, 11);
        assert!(done.is_complete());
        assert_eq!(done.label(), "✓ Form Complete - Ready to Submit!");
    }

    #[test]
    fn test_submit_shortcut() {
        assert!(KeyPress::new("Enter").with_ctrl().is_submit_shortcut());
        assert!(KeyPress::new("Enter").with_meta().is_submit_shortcut());
        assert!(!KeyPress::new("Enter").is_submit_shortcut());
        assert!(!KeyPress::new("s").with_ctrl().is_submit_shortcut());
    }
}
