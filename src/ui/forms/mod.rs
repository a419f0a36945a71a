//! Form rendering module
//!
//! - `field_renderer`: a boxed field with its error slot
//! - `join_form`: the sign-up form, message banner and buttons

mod field_renderer;
mod join_form;

pub use join_form::draw_join_form;
