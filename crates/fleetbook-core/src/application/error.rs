//! Application layer errors.
//!
//! These errors represent failures in orchestration and infrastructure, not
//! admission decisions. Admission outcomes are `DomainError` from
//! `crate::domain`. Nothing here may be read as "the booking is invalid".

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to driven ports.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Store access failed (lock poisoned, etc.).
    #[error("Entity store error")]
    StoreLockError,

    /// The store could not be reached or refused the operation.
    #[error("Entity store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Reading or writing the backing file failed.
    #[error("Store I/O error at {path}: {reason}")]
    StoreIo { path: PathBuf, reason: String },

    /// The backing file exists but could not be decoded.
    #[error("Store data at {path} is corrupt: {reason}")]
    StoreCorrupt { path: PathBuf, reason: String },

    /// A record was handed to the store in a state it cannot persist.
    #[error("Invalid store operation: {reason}")]
    InvalidStoreOperation { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StoreLockError => vec![
                "The entity store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::StoreUnavailable { reason } => vec![
                format!("Store reported: {reason}"),
                "No changes were made".into(),
            ],
            Self::StoreIo { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the data directory exists".into(),
            ],
            Self::StoreCorrupt { path, .. } => vec![
                format!("Inspect or restore {}", path.display()),
                "The file must contain a JSON snapshot written by fleetbook".into(),
            ],
            Self::InvalidStoreOperation { .. } => {
                vec!["This appears to be a bug in Fleetbook".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Internal
    }
}
