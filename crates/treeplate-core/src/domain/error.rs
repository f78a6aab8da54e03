// ============================================================================
// domain/error.rs - CONFIGURATION AND PATH RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `TreeplateError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Delimiters must be set together (left: '{left}', right: '{right}')")]
    PartialDelimiters { left: String, right: String },

    #[error("Template root must not be empty")]
    EmptyRoot,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidExtension { extension, .. } => vec![
                format!("'{}' cannot match a file's final suffix", extension),
                "Use a single suffix such as .tmpl, .md or .tex".into(),
            ],
            Self::PartialDelimiters { .. } => vec![
                "Pass both a left and a right delimiter".into(),
                "Or pass neither to keep the engine defaults".into(),
            ],
            Self::EmptyRoot => vec!["Pass the directory that holds your templates".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidExtension { .. } | Self::PartialDelimiters { .. } => {
                ErrorCategory::Configuration
            }
            Self::EmptyRoot => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
