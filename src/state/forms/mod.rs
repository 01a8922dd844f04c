//! Form domain layer
//!
//! Field identifiers, single-field updates and the registration form's
//! draft/error/focus state.

mod field;
mod form_state;

pub use field::{Cycle, FieldId, FieldKind};
pub use form_state::{Form, RegistrationForm, SubmitOutcome, UploadApplied};
