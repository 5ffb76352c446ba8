use thiserror::Error;

/// Failure kinds surfaced by the services. The API layer maps each
/// variant to a distinct HTTP status; absence on lookup or delete is
/// never an error and does not appear here.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed a stated constraint: blank field, length bound, or
    /// missing referential target. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// Username already taken. Maps to 409.
    #[error("duplicate username")]
    Duplicate,

    /// Credentials matched no stored account. Maps to 401. The message
    /// is deliberately uniform so it cannot leak whether the username
    /// exists.
    #[error("login unsuccessful")]
    Unauthorized,

    /// Store-level failure. Maps to 500.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
