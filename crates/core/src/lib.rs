//! Domain primitives shared by the store layer and the HTTP layer.
//!
//! Nothing in this crate performs I/O: identifier types, the domain error,
//! presence checks for incoming fields and the key sanitizer used on the
//! document routes.

pub mod error;
pub mod presence;
pub mod sanitize;
pub mod types;
