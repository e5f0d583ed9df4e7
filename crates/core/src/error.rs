/// Domain errors detected before or after a store call.
///
/// Both variants carry the exact client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}
