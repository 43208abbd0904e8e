//! Unified error handling for Fleetbook Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, FieldViolations};

/// Root error type for Fleetbook Core operations.
///
/// `Domain` carries admission outcomes the caller can fix; every other variant
/// is an opaque failure that must not be mistaken for a validation result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    /// Errors from the domain layer (admission and lookup outcomes).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (store and orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl FleetError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Whether this is an admission/lookup outcome rather than a failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// The domain error, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Application(_) => None,
        }
    }

    /// Field violations carried by this error, if any.
    pub fn violations(&self) -> Option<&FieldViolations> {
        self.as_domain().and_then(DomainError::violations)
    }
}

impl From<FieldViolations> for FleetError {
    fn from(violations: FieldViolations) -> Self {
        Self::Domain(DomainError::FieldViolation(violations))
    }
}

/// Error categories for UI display and status mapping.
///
/// | Category      | Status equivalent |
/// |---------------|-------------------|
/// | Validation    | bad request       |
/// | Conflict      | conflict          |
/// | NotFound      | not found         |
/// | Internal      | server error      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type FleetResult<T> = Result<T, FleetError>;
