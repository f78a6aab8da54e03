//! Unified error handling for treeplate core.
//!
//! Every failure in a parse or render pass is fatal to that pass and carries
//! the offending path. Nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Root error type for treeplate operations.
#[derive(Debug, Error, Clone)]
pub enum TreeplateError {
    /// Invalid configuration (extension, delimiters, root).
    #[error("Configuration error: {0}")]
    Domain(#[from] DomainError),

    /// The template root, or an entry under it, does not exist.
    #[error("No such file or directory: {path}")]
    NotFound { path: String },

    /// A directory or entry exists but could not be listed, opened or named.
    #[error("Failed to read {path}: {reason}")]
    Traversal { path: String, reason: String },

    /// A template file could not be read or is not valid UTF-8.
    #[error("Failed to decode template {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The template body does not compile under the configured delimiters.
    #[error("Syntax error in template {name}: {reason}")]
    Syntax { name: String, reason: String },

    /// Substituting data into a compiled template failed.
    #[error("Failed to execute template {name}: {reason}")]
    Execution { name: String, reason: String },

    /// A destination directory or file could not be created or written.
    #[error("Output error at {path}: {reason}")]
    Output { path: PathBuf, reason: String },

    /// A non-template asset could not be copied.
    #[error("Failed to copy {from} to {to}: {reason}")]
    Copy {
        from: String,
        to: PathBuf,
        reason: String,
    },

    /// The data value could not be converted for the templates.
    #[error("Invalid template data: {reason}")]
    InvalidData { reason: String },

    /// The pass was cancelled before finishing.
    #[error("Operation cancelled")]
    Cancelled,

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TreeplateError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::NotFound { path } => vec![
                format!("Check that '{}' exists", path),
                "Ensure nothing removes files while the walk is running".into(),
            ],
            Self::Traversal { path, .. } => vec![
                format!("Check that you can read '{}'", path),
                "Entry names must be valid UTF-8".into(),
            ],
            Self::Decode { path, .. } => vec![
                format!("Template files must be UTF-8 text: {}", path),
                "Rename binary files so they do not carry the template extension".into(),
            ],
            Self::Syntax { name, .. } => vec![
                format!("Fix the template syntax in {}", name),
                "Check that the configured delimiters match the ones used in the file".into(),
            ],
            Self::Execution { name, .. } => vec![
                format!("Template {} referenced data that was not supplied", name),
                "Check the keys in your data file".into(),
            ],
            Self::Output { path, .. } | Self::Copy { to: path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::InvalidData { .. } => {
                vec!["Template data must serialize to a JSON-compatible value".into()]
            }
            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "Files already written were left in place".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in treeplate".into(),
                "Please report this issue at: https://github.com/cosecruz/treeplate/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Decode { .. }
            | Self::Syntax { .. }
            | Self::Execution { .. }
            | Self::InvalidData { .. }
            | Self::Cancelled => ErrorCategory::Validation,
            Self::Traversal { .. }
            | Self::Output { .. }
            | Self::Copy { .. }
            | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Path (or template name) the error is about, if any.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::NotFound { path }
            | Self::Traversal { path, .. }
            | Self::Decode { path, .. } => Some(path.clone()),
            Self::Syntax { name, .. } | Self::Execution { name, .. } => Some(name.clone()),
            Self::Output { path, .. } => Some(path.display().to_string()),
            Self::Copy { from, .. } => Some(from.clone()),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type TreeplateResult<T> = Result<T, TreeplateError>;
