use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Incorrect credentials")]
    InvalidCredentials,

    #[error("Notifications permission not granted")]
    PermissionDenied,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored value is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Errors the user can fix by resubmitting, as opposed to storage failures.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::InvalidInput { .. }
            | Self::DuplicateEmail
            | Self::InvalidCredentials
            | Self::PermissionDenied => true,
            Self::Database(_)
            | Self::Serialization(_)
            | Self::PasswordHash(_)
            | Self::Internal(_) => false,
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(e.to_string())
    }
}
