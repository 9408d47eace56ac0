// File: src/binder.rs
// Purpose: Live validation of a single form field

use std::fmt;

use tracing::trace;

use crate::form::{FieldId, FieldMark};
use crate::surface::FormSurface;

type Predicate = Box<dyn Fn(&str) -> bool>;

/// A field wired to a validation predicate and its inline error message
///
/// - blur always validates
/// - input validates only while the field is marked invalid, so fixing a
///   typo clears the error live but untouched fields stay quiet until blur
/// - [`FieldBinder::validate_now`] runs the same check for the submit pass
pub struct FieldBinder {
    field: FieldId,
    message: String,
    predicate: Predicate,
}

impl FieldBinder {
    /// Attach `predicate` to `field`, creating its hidden error message
    pub fn bind<P>(
        field: FieldId,
        predicate: P,
        message: impl Into<String>,
        surface: &mut dyn FormSurface,
    ) -> Self
    where
        P: Fn(&str) -> bool + 'static,
    {
        let message = message.into();
        surface.attach_error(field, &message);
        surface.set_error_visible(field, false);

        Self {
            field,
            message,
            predicate: Box::new(predicate),
        }
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validate the current value and reflect the result on the page
    pub fn validate_now(&self, surface: &mut dyn FormSurface) -> bool {
        let value = surface.value(self.field);
        let is_valid = (self.predicate)(&value);

        if is_valid {
            surface.set_mark(self.field, FieldMark::Valid);
            surface.set_error_visible(self.field, false);
        } else {
            surface.set_mark(self.field, FieldMark::Invalid);
            surface.set_error_visible(self.field, true);
        }

        trace!(field = %self.field, is_valid, "field validated");
        is_valid
    }

    pub fn on_blur(&self, surface: &mut dyn FormSurface) -> bool {
        self.validate_now(surface)
    }

    /// Returns `None` when the field was not flagged and nothing ran
    pub fn on_input(&self, surface: &mut dyn FormSurface) -> Option<bool> {
        if surface.mark(self.field) == FieldMark::Invalid {
            Some(self.validate_now(surface))
        } else {
            None
        }
    }
}

impl fmt::Debug for FieldBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinder")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
