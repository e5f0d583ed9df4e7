//! Request-rewriting middleware.
//!
//! - [`sanitize::sanitize_input`] -- Rewrites operator characters in JSON body
//!   and query-string keys before they reach the document store handlers.

pub mod sanitize;
