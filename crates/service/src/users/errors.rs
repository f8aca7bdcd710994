use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User must have an email address.")]
    MissingEmail,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user with this email already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<ModelError> for UserError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => Self::Validation(m),
            ModelError::Conflict(_) => Self::Conflict,
            ModelError::Db(m) => Self::Repository(m),
        }
    }
}
