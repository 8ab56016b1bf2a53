//! Error types for Tasty

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TastyError>;

#[derive(Error, Debug)]
pub enum TastyError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TastyError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        TastyError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        TastyError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        TastyError::Validation(msg.into())
    }

    /// Errors that come from infrastructure rather than the caller
    pub fn is_internal(&self) -> bool {
        matches!(self, TastyError::Database(_) | TastyError::Internal(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for TastyError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => TastyError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                TastyError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                TastyError::NotFound("Referenced record not found".to_string())
            }
            _ => TastyError::Database(e.to_string()),
        }
    }
}
