use thiserror::Error;

use crate::domain::validator::ValidationError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Repository error: {message}")]
    Repository { message: String },
}

impl DomainError {
    pub fn user_not_found(id: u64) -> Self {
        Self::UserNotFound { id }
    }

    /// Flatten an infrastructure failure, keeping its whole cause chain.
    pub fn repository(err: anyhow::Error) -> Self {
        Self::Repository {
            message: format!("{err:#}"),
        }
    }
}
