//! Application layer errors.
//!
//! These errors represent failures in sync orchestration, not configuration
//! validity. Configuration errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a sync run.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An existing target file does not parse as Rust. The file is left
    /// untouched; resynthesizing over it would discard the developer's
    /// edits.
    #[error("Existing file {path} is not valid Rust: {reason}")]
    UnparsableSource { path: PathBuf, reason: String },

    /// Filesystem adapter state is poisoned (lock failure).
    #[error("Filesystem adapter lock error")]
    AdapterLockError,

    /// The generation plan came out empty (every artifact feature-gated off).
    #[error("Nothing to generate for entity '{entity}'")]
    EmptyPlan { entity: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output root exists".into(),
            ],
            Self::UnparsableSource { path, .. } => vec![
                format!("Fix the syntax error in {} and rerun", path.display()),
                "Or delete the file to regenerate it from scratch".into(),
            ],
            Self::AdapterLockError => vec![
                "The filesystem adapter is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::EmptyPlan { entity } => vec![
                format!("Every artifact of '{entity}' is disabled by feature flags"),
                "Enable at least one feature or check the entity configuration".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::AdapterLockError => ErrorCategory::Internal,
            Self::UnparsableSource { .. } => ErrorCategory::Validation,
            Self::EmptyPlan { .. } => ErrorCategory::Configuration,
        }
    }
}
