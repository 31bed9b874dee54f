//! Errors the engine can return.
//!
//! The variants follow the pipeline's failure taxonomy:
//!
//! - [`NotFound`] when a staged row or ledger entry does not exist, or
//!   belongs to another user (the two cases are indistinguishable on
//!   purpose).
//! - [`Validation`] when an edit would violate a domain invariant; the
//!   message names the violated constraint.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`Validation`]: EngineError::Validation
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
