//! Debate Forms Validation
//!
//! Pure validation predicates for the registration form.
//! Used by the form controller natively and by the WASM bindings in the browser.
//! Nothing in here touches UI state, so every rule can be tested in isolation.

pub mod collection;
pub mod email;
pub mod phone;
pub mod string;

// Re-export all validators
pub use collection::*;
pub use email::*;
pub use phone::*;
pub use string::*;
