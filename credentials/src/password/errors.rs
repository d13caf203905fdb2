use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    InvalidInput,

    #[error("Password cannot be longer than {max_bytes} bytes")]
    TooLong { max_bytes: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hasher configuration: {0}")]
    InvalidConfiguration(String),
}
