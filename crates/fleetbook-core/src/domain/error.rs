// ============================================================================
// domain/error.rs - ADMISSION ERROR DOMAIN
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{EntityKind, TaxiId};

/// Field name → message pairs produced by field-level checks.
///
/// Ordered by field name so rendering is deterministic. The first message
/// recorded for a field wins; later ones for the same field are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldViolations(BTreeMap<String, String>);

impl FieldViolations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a single violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut violations = Self::new();
        violations.push(field, message);
        violations
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Fold another set in, keeping messages already present.
    pub fn merge(&mut self, other: FieldViolations) {
        for (field, message) in other.0 {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when empty, otherwise a [`DomainError::FieldViolation`].
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::FieldViolation(self))
        }
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Root domain error type.
///
/// These are the outcomes a caller can act on by correcting its input. They
/// never describe infrastructure trouble; that lives in
/// [`ApplicationError`](crate::application::ApplicationError).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid fields: {0}")]
    FieldViolation(FieldViolations),

    #[error("The {kind} ID cannot be modified (target {expected}, payload {found:?})")]
    IdentityMismatch {
        kind: EntityKind,
        expected: u64,
        found: Option<u64>,
    },

    // ========================================================================
    // Conflict Errors (409-level equivalent)
    // ========================================================================
    #[error("{kind} {id} does not exist")]
    ReferenceNotFound { kind: EntityKind, id: u64 },

    #[error("Taxi {taxi} is already booked on {date}")]
    DuplicateBooking { taxi: TaxiId, date: NaiveDate },

    #[error("Email '{email}' is already registered")]
    DuplicateEmail { email: String },

    #[error("Registration '{reg}' is already in use")]
    DuplicateRegistration { reg: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: u64 },
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn reference_not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        Self::ReferenceNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FieldViolation(violations) => violations
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect(),
            Self::IdentityMismatch { kind, .. } => vec![
                format!("The {kind} id is read-only"),
                "Send the payload with the same id as the record being updated".into(),
            ],
            Self::ReferenceNotFound { kind, id } => vec![
                format!("That {kind} doesn't exist, please use another {kind} ID"),
                format!("No {kind} is registered with id {id}"),
            ],
            Self::DuplicateBooking { taxi, date } => vec![
                format!("Taxi {taxi} already has a booking on {date}"),
                "Choose another date or another taxi".into(),
            ],
            Self::DuplicateEmail { .. } => {
                vec!["That email is already used, please use a unique email".into()]
            }
            Self::DuplicateRegistration { .. } => {
                vec!["That reg is already used, please use a unique reg".into()]
            }
            Self::NotFound { kind, .. } => vec![format!(
                "List existing records with: fleetbook {kind} list"
            )],
        }
    }

    /// Error category for display styling and status mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FieldViolation(_) | Self::IdentityMismatch { .. } => ErrorCategory::Validation,
            Self::ReferenceNotFound { .. }
            | Self::DuplicateBooking { .. }
            | Self::DuplicateEmail { .. }
            | Self::DuplicateRegistration { .. } => ErrorCategory::Conflict,
            Self::NotFound { .. } => ErrorCategory::NotFound,
        }
    }

    /// The field violations carried by this error, if any.
    pub fn violations(&self) -> Option<&FieldViolations> {
        match self {
            Self::FieldViolation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<FieldViolations> for DomainError {
    fn from(violations: FieldViolations) -> Self {
        Self::FieldViolation(violations)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
}
