//! Form domain layer
//!
//! Field values, focus handling and the validation rules for the sign-up form.

mod field;
mod form_state;
mod validation;

pub use field::{FieldId, FieldValue, FormField, SelectedFile};
pub use form_state::{Form, FormButton, JoinForm};
pub use validation::*;
