//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidType`] thrown when the `income`/`expense` discriminator is
//!   missing or unknown.
//! - [`Validation`] thrown when one or more input fields are rejected.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`ExistingKey`] thrown when a username is already registered. Usernames
//!   are the only unique key; other names may repeat.
//!
//!  [`InvalidType`]: EngineError::InvalidType
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
use sea_orm::DbErr;
use thiserror::Error;

/// A rejected input field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Carries the resource label, e.g. `category`.
    #[error("Invalid {0} type")]
    InvalidType(String),
    #[error("Validation error")]
    Validation(Vec<FieldError>),
    /// Carries the resource label, e.g. `Category`.
    #[error("{0} not found")]
    KeyNotFound(String),
    /// Only raised by [`Engine::create_user`](crate::Engine::create_user).
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidType(a), Self::InvalidType(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
