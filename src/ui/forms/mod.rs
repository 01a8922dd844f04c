//! Form rendering module
//!
//! - `field_renderer`: boxed field and help line primitives
//! - `registration_form`: the registration page

mod field_renderer;
mod registration_form;

pub use registration_form::draw_registration;
