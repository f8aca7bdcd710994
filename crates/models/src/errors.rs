use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Map a driver error, turning unique-index violations into `Conflict`.
    pub fn from_db(err: DbErr, conflict: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}
