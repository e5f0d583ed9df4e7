//! Request handlers, one module per resource.
//!
//! Each handler validates its input, issues exactly one store call through
//! the trait objects in [`crate::state::AppState`] and maps the outcome via
//! [`crate::error::AppError`].

pub mod heroes;
pub mod villains;
