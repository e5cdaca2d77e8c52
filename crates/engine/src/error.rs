//! The module contains the errors the engine can return.
//!
//! None of them is fatal: every failing operation leaves the ledger as it was
//! and hands the error back to the caller for display.
//!
//! - [`Validation`] carries every invalid field of a rejected input at once.
//! - [`DuplicateParticipant`] thrown when a name is already in the ledger, or
//!   is blank (the name is then empty).
//! - [`NotFound`] thrown when a participant or an expense is missing. Safe to
//!   treat as a no-op.
//! - [`MalformedDocument`] thrown when a persisted document cannot be loaded.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`DuplicateParticipant`]: EngineError::DuplicateParticipant
//!  [`NotFound`]: EngineError::NotFound
//!  [`MalformedDocument`]: EngineError::MalformedDocument
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("\"{0}\" already present!")]
    DuplicateParticipant(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::DuplicateParticipant(a), Self::DuplicateParticipant(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::MalformedDocument(a), Self::MalformedDocument(b)) => a == b,
            (Self::Overflow(a), Self::Overflow(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<ValidationErrors> for EngineError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Input field a [`FieldError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Payer,
    Amount,
    Description,
    SplitWith,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payer => "paidBy",
            Self::Amount => "amount",
            Self::Description => "description",
            Self::SplitWith => "splitWith",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invalid field with a message meant for the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every problem found while validating one input.
///
/// Validation never stops at the first failure, so a form can flag all of its
/// invalid fields in one go.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded, the collected errors otherwise.
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}
