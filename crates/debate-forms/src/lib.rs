// Debate Forms - registration form handling for the debate competition page
// Validation, submit flow, local persistence and admin export, UI-agnostic

pub mod admin;
pub mod binder;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod form;
pub mod model;
pub mod storage;
pub mod surface;

// Re-export the pure validators
pub use debate_forms_validation as validation;

// Re-export core types
pub use admin::{AdminPanel, AdminSession};
pub use binder::FieldBinder;
pub use config::Config;
pub use controller::{EventOutcome, FormController, SubmissionState, SubmitOutcome};
pub use error::{
    AuthenticationError, ExportError, ParseError, StorageError, StoreError, SubmissionError,
};
pub use export::{ExportFile, ExportFormat, Exporter};
pub use form::{FieldId, FieldKind, FieldMark, FormSchema, ValidationReport};
pub use model::{
    Clock, FixedClock, RegistrationId, RegistrationRecord, Submission, SystemClock,
    TeamPreference,
};
pub use storage::{KeyValueStore, MemoryStore, StorageGateway};
pub use surface::{
    AdminSurface, CharacterCounter, CounterTone, FileSink, FormEvent, FormSurface, KeyPress,
    Notification, NotificationLevel, Notifier, Progress,
};
