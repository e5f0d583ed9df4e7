//! Route tables, one module per resource. They are mounted, and the
//! `/mongo` filter applied, in [`crate::router::build_app_router`].

pub mod health;
pub mod heroes;
pub mod root;
pub mod villains;
