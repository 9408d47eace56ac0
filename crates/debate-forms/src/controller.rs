// File: src/controller.rs
// Purpose: Form controller - submit state machine, conditional partner
// section, live counter/progress and keyboard shortcuts

use std::time::Duration;

use debate_forms_validation::{
    validate_email, validate_interests, validate_optional_text_length, validate_phone,
    EMAIL_MESSAGE, INTERESTS_MESSAGE, MOTIVATION_MESSAGE, PHONE_MESSAGE,
};
use tracing::{debug, error, info, warn};

use crate::binder::FieldBinder;
use crate::config::Config;
use crate::error::SubmissionError;
use crate::form::{FieldId, FieldKind, FieldMark, FormSchema, ValidationReport};
use crate::model::{optional_text, Clock, RegistrationId, Submission, TeamPreference};
use crate::storage::{KeyValueStore, StorageGateway};
use crate::surface::{CharacterCounter, FormEvent, FormSurface, Notifier, Progress};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const AGREEMENT_MESSAGE: &str = "Please accept the terms to register";
pub const STORAGE_ALERT: &str =
    "There was an error saving your registration. Please try again or contact support.";

/// Where the submit flow currently is
///
/// `Idle -> Validating -> (Invalid | Submitting) -> Idle`. The invalid branch
/// returns to `Idle` immediately, so it never shows up as a resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked; every failing field is listed and flagged on the page
    Invalid(ValidationReport),
    /// Accepted; the host calls [`FormController::finish_submission`] once
    /// after `delay`
    Pending { delay: Duration },
    /// A submission is already in flight
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Ignored,
    Submit(SubmitOutcome),
}

impl EventOutcome {
    /// The browser's own form submission must never run
    pub fn prevent_default(&self) -> bool {
        matches!(self, EventOutcome::Submit(_))
    }

    pub fn pending_delay(&self) -> Option<Duration> {
        match self {
            EventOutcome::Submit(SubmitOutcome::Pending { delay }) => Some(*delay),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FormController {
    schema: FormSchema,
    state: SubmissionState,
    email: FieldBinder,
    phone: FieldBinder,
    motivation: FieldBinder,
    delay: Duration,
    motivation_min: usize,
    motivation_display_max: usize,
}

impl FormController {
    /// Bind live validation and paint the initial counter and progress
    pub fn new(config: &Config, surface: &mut dyn FormSurface) -> Self {
        let motivation_min = config.motivation.min_chars;

        let email = FieldBinder::bind(FieldId::Email, validate_email, EMAIL_MESSAGE, surface);
        let phone = FieldBinder::bind(FieldId::Phone, validate_phone, PHONE_MESSAGE, surface);
        let motivation = FieldBinder::bind(
            FieldId::Motivation,
            move |text: &str| validate_optional_text_length(text, motivation_min),
            MOTIVATION_MESSAGE,
            surface,
        );

        surface.attach_error(FieldId::Interests, INTERESTS_MESSAGE);
        surface.set_error_visible(FieldId::Interests, false);
        surface.set_partner_section_visible(false);
        surface.set_required(FieldId::PartnerName, false);

        let controller = Self {
            schema: FormSchema::new(),
            state: SubmissionState::Idle,
            email,
            phone,
            motivation,
            delay: config.submission.delay(),
            motivation_min,
            motivation_display_max: config.motivation.display_max_chars,
        };

        controller.update_counter(surface);
        controller.update_progress(surface);
        info!("Registration form initialized");
        controller
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Dispatch one UI notification
    pub fn handle_event(
        &mut self,
        event: FormEvent,
        surface: &mut dyn FormSurface,
        notifier: &mut dyn Notifier,
    ) -> EventOutcome {
        match event {
            FormEvent::Input(field) => {
                self.on_input(field, surface);
                EventOutcome::Handled
            }
            FormEvent::Change(field) => {
                self.on_change(field, surface);
                EventOutcome::Handled
            }
            FormEvent::Blur(field) => match self.binder_for(field) {
                Some(binder) => {
                    binder.on_blur(surface);
                    EventOutcome::Handled
                }
                None => EventOutcome::Ignored,
            },
            FormEvent::Submit => EventOutcome::Submit(self.submit(surface)),
            FormEvent::KeyDown(key) => {
                if key.is_submit_shortcut() {
                    EventOutcome::Submit(self.submit(surface))
                } else if key.key == "Escape" && notifier.is_confirmation_open() {
                    notifier.close_confirmation();
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            FormEvent::CloseConfirmation | FormEvent::BackdropClick => {
                if notifier.is_confirmation_open() {
                    notifier.close_confirmation();
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    fn binder_for(&self, field: FieldId) -> Option<&FieldBinder> {
        match field {
            FieldId::Email => Some(&self.email),
            FieldId::Phone => Some(&self.phone),
            FieldId::Motivation => Some(&self.motivation),
            _ => None,
        }
    }

    fn on_input(&mut self, field: FieldId, surface: &mut dyn FormSurface) {
        if let Some(binder) = self.binder_for(field) {
            binder.on_input(surface);
        }
        if field == FieldId::Motivation {
            self.update_counter(surface);
        }
        self.update_progress(surface);
    }

    fn on_change(&mut self, field: FieldId, surface: &mut dyn FormSurface) {
        match field {
            FieldId::TeamPreference => self.on_team_preference_change(surface),
            FieldId::Interests => {
                self.check_interests(surface);
            }
            _ => {}
        }
        self.update_progress(surface);
    }

    /// Show and require the partner name only for `WithPartner`
    pub fn on_team_preference_change(&mut self, surface: &mut dyn FormSurface) {
        let preference = TeamPreference::from_form_value(&surface.value(FieldId::TeamPreference));
        let with_partner = preference == TeamPreference::WithPartner;

        surface.set_partner_section_visible(with_partner);
        surface.set_required(FieldId::PartnerName, with_partner);
        self.schema.set_required(FieldId::PartnerName, with_partner);

        if !with_partner {
            surface.set_value(FieldId::PartnerName, "");
            surface.set_mark(FieldId::PartnerName, FieldMark::Neutral);
        }
        debug!(team_preference = preference.as_str(), "partner section updated");
    }

    fn check_interests(&self, surface: &mut dyn FormSurface) -> bool {
        let is_valid = validate_interests(surface.selected_interests().len());
        surface.set_error_visible(FieldId::Interests, !is_valid);
        is_valid
    }

    fn is_filled(field: FieldId, surface: &dyn FormSurface) -> bool {
        match field.kind() {
            FieldKind::Checkbox => surface.is_checked(field),
            FieldKind::CheckboxGroup => !surface.selected_interests().is_empty(),
            _ => !surface.value(field).trim().is_empty(),
        }
    }

    /// Run every check, flag every failure, and report them all
    pub fn validate_form(&self, surface: &mut dyn FormSurface) -> ValidationReport {
        let mut report = ValidationReport::new();

        for field in self.schema.required_fields() {
            if Self::is_filled(field, surface) {
                surface.set_mark(field, FieldMark::Valid);
            } else {
                surface.set_mark(field, FieldMark::Invalid);
                report.add(field, REQUIRED_MESSAGE);
            }
        }

        for binder in [&self.email, &self.phone] {
            if !binder.validate_now(surface) {
                report.add(binder.field(), binder.message());
            }
        }

        // Optional: only judged once something was written
        if !surface.value(FieldId::Motivation).trim().is_empty()
            && !self.motivation.validate_now(surface)
        {
            report.add(FieldId::Motivation, self.motivation.message());
        }

        if !self.check_interests(surface) {
            report.add(FieldId::Interests, INTERESTS_MESSAGE);
        }

        if !surface.is_checked(FieldId::Agreement) {
            surface.set_mark(FieldId::Agreement, FieldMark::Invalid);
            if !report.is_invalid(FieldId::Agreement) {
                report.add(FieldId::Agreement, AGREEMENT_MESSAGE);
            }
        }

        report
    }

    /// Handle the submit action
    pub fn submit(&mut self, surface: &mut dyn FormSurface) -> SubmitOutcome {
        if self.state == SubmissionState::Submitting {
            debug!("submit ignored, a submission is already in flight");
            return SubmitOutcome::Busy;
        }

        self.state = SubmissionState::Validating;
        let report = self.validate_form(surface);

        if !report.is_valid() {
            if let Some(first) = report.first_invalid() {
                surface.scroll_into_view(first);
            }
            debug!(invalid = ?report.to_map(), "submission blocked by validation");
            self.state = SubmissionState::Idle;
            return SubmitOutcome::Invalid(report);
        }

        surface.set_loading(true);
        surface.set_submit_enabled(false);
        self.state = SubmissionState::Submitting;
        debug!(delay_ms = self.delay.as_millis() as u64, "submission pending");

        SubmitOutcome::Pending { delay: self.delay }
    }

    /// Read the form into a submission record
    pub fn collect_submission(&self, surface: &dyn FormSurface, clock: &dyn Clock) -> Submission {
        let team_preference =
            TeamPreference::from_form_value(&surface.value(FieldId::TeamPreference));
        let partner_name = match team_preference {
            TeamPreference::WithPartner => optional_text(surface.value(FieldId::PartnerName)),
            TeamPreference::Solo => None,
        };

        Submission {
            full_name: surface.value(FieldId::FullName),
            email: surface.value(FieldId::Email),
            phone: surface.value(FieldId::Phone),
            roll_number: surface.value(FieldId::RollNumber),
            batch: surface.value(FieldId::Batch),
            branch: surface.value(FieldId::Branch),
            semester: surface.value(FieldId::Semester),
            experience: surface.value(FieldId::Experience),
            interests: surface.selected_interests(),
            motivation: optional_text(surface.value(FieldId::Motivation)),
            team_preference,
            partner_name,
            preferred_role: surface.value(FieldId::PreferredRole),
            achievements: optional_text(surface.value(FieldId::Achievements)),
            special_requirements: optional_text(surface.value(FieldId::SpecialRequirements)),
            newsletter: surface.is_checked(FieldId::Newsletter),
            timestamp: clock.now(),
        }
    }

    /// The deferred half of submit: store, confirm or alert, then reset
    ///
    /// The form is reset whether or not the save succeeded; a failed
    /// submission is discarded.
    pub fn finish_submission<S: KeyValueStore>(
        &mut self,
        surface: &mut dyn FormSurface,
        notifier: &mut dyn Notifier,
        gateway: &mut StorageGateway<S>,
        clock: &dyn Clock,
    ) -> Result<RegistrationId, SubmissionError> {
        if self.state != SubmissionState::Submitting {
            warn!(state = ?self.state, "finish_submission called without a pending submission");
            return Err(SubmissionError::NotPending);
        }

        let submission = self.collect_submission(surface, clock);
        let result = gateway.save(&submission);

        match &result {
            Ok(id) => {
                info!(registration_id = %id, "Registration submitted");
                notifier.show_confirmation(id);
            }
            Err(err) => {
                error!(error = %err, "Storage error");
                notifier.alert(STORAGE_ALERT);
            }
        }

        self.reset(surface);
        result.map_err(SubmissionError::from)
    }

    /// Back to a blank, idle form
    pub fn reset(&mut self, surface: &mut dyn FormSurface) {
        surface.reset();

        for field in FieldId::ALL {
            surface.set_mark(field, FieldMark::Neutral);
        }
        for field in [
            FieldId::Email,
            FieldId::Phone,
            FieldId::Motivation,
            FieldId::Interests,
        ] {
            surface.set_error_visible(field, false);
        }

        surface.set_loading(false);
        surface.set_submit_enabled(true);
        surface.set_partner_section_visible(false);
        surface.set_required(FieldId::PartnerName, false);
        self.schema.set_required(FieldId::PartnerName, false);

        self.update_counter(surface);
        self.update_progress(surface);
        self.state = SubmissionState::Idle;
    }

    pub fn update_counter(&self, surface: &mut dyn FormSurface) -> CharacterCounter {
        let counter = CharacterCounter::new(
            &surface.value(FieldId::Motivation),
            self.motivation_min,
            self.motivation_display_max,
        );
        surface.set_counter(&counter);
        counter
    }

    pub fn update_progress(&self, surface: &mut dyn FormSurface) -> Progress {
        let view: &dyn FormSurface = surface;
        let filled = self
            .schema
            .required_fields()
            .filter(|field| Self::is_filled(*field, view))
            .count();
        let progress = Progress::new(filled, self.schema.required_count());
        surface.set_progress(&progress);
        progress
    }
}
