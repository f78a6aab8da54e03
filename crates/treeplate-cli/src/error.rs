//! CLI errors, their exit codes and how they are shown on stderr.

use std::error::Error as StdError;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use treeplate_core::error::{ErrorCategory as CoreCategory, TreeplateError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A malformed `--set` pair or similar argument the parser accepted.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The `--data` file is missing, unreadable, or not JSON/TOML.
    #[error("Cannot use data file {}: {message}", path.display())]
    DataFile {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Loading or writing `AppConfig` failed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A parse or render pass failed.
    #[error("{0}")]
    Core(#[from] TreeplateError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

/// How an error is classified for exit codes and log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input, bad templates or bad data. Also cancelled passes.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::DataFile { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(err) => match err.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Process exit status: 2 user, 3 not found, 4 configuration, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    /// File or template the error is about, if any.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Core(err) => err.path(),
            Self::DataFile { path, .. } => Some(path.display().to_string()),
            _ => None,
        }
    }

    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(err) => err.suggestions(),
            Self::InvalidInput { .. } => vec![
                "Pass values as --set KEY=VALUE".into(),
                "Run with --help to see every option".into(),
            ],
            Self::DataFile { path, .. } => vec![
                format!("Check that '{}' exists and is readable", path.display()),
                "Data files must end in .json or .toml".into(),
                "Use --set KEY=VALUE for a few plain values instead".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "The default config file lives at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'treeplate init --force' to write a fresh default config".into(),
            ],
            Self::IoError { .. } => {
                vec!["Check permissions and free space on the target disk".into()]
            }
        }
    }

    /// Error report with ANSI styling.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.report(verbose, true)
    }

    /// Error report without escape codes, for pipes and `--no-color`.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.report(verbose, false)
    }

    fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                paint("\u{2717} Error:", Style::new().red().bold()),
                paint(&self.to_string(), Style::new().red())
            ),
        ];

        if verbose {
            let causes = std::iter::successors(self.source(), |err: &&(dyn StdError + 'static)| {
                (*err).source()
            });
            lines.extend(
                causes.map(|cause| paint(&format!("  caused by: {cause}"), Style::new().dimmed())),
            );
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", Style::new().yellow().bold()));
            lines.extend(suggestions.iter().map(|s| format!("  - {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint(
                "Re-run with -v / --verbose for more details.",
                Style::new().dimmed(),
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Emit one tracing event at a severity matching the category.
    pub fn log(&self) {
        let category = self.category();
        let path = self.path();
        let cause = self.source().map(|s| s.to_string());
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, path, cause, "{self}");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, path, cause, "{self}");
            }
        }
    }
}

/// Attach a message when turning an I/O failure into a [`CliError`].
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for std::io::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}
