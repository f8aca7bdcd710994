use thiserror::Error;

use crate::users::UserError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided.")]
    MissingCredentials,
    #[error("Unable to authenticate with provided credentials.")]
    InvalidCredentials,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("User inactive or deleted.")]
    Inactive,
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingCredentials => 1001,
            AuthError::InvalidCredentials => 1002,
            AuthError::InvalidToken => 1003,
            AuthError::Inactive => 1004,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self { AuthError::Repository(e.to_string()) }
}
