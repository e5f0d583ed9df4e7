//! Row and document models plus the request DTOs that feed them.

pub mod hero;
pub mod villain;
