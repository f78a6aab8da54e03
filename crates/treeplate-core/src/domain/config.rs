//! Parser configuration.
//!
//! A [`ParserConfig`] names the template root and the two knobs the walker
//! recognises: the template extension and an optional delimiter pair. It is
//! read-only once built, so independent passes may share it freely.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Extension used when the caller does not pick one.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = ".tmpl";

/// A left/right delimiter pair overriding the engine's variable delimiters.
///
/// Invariant: both sides are non-empty. Construct through
/// [`Delimiters::new`] or [`ParserConfigBuilder::delimiters`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delimiters {
    left: String,
    right: String,
}

impl Delimiters {
    /// Build a delimiter pair.
    ///
    /// Returns `Ok(None)` when both sides are empty (engine defaults apply)
    /// and an error when only one side is set.
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Option<Self>, DomainError> {
        let (left, right) = (left.into(), right.into());
        match (left.is_empty(), right.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => Ok(Some(Self { left, right })),
            _ => Err(DomainError::PartialDelimiters { left, right }),
        }
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }
}

/// Configuration for one template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    root: String,
    extension: String,
    delimiters: Option<Delimiters>,
}

impl ParserConfig {
    /// Configuration with the default extension and engine delimiters.
    pub fn new(root: impl Into<String>) -> Result<Self, DomainError> {
        Self::builder(root).build()
    }

    pub fn builder(root: impl Into<String>) -> ParserConfigBuilder {
        ParserConfigBuilder::new(root)
    }

    /// Directory the walk starts from, exactly as given.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Lower-cased extension including its leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn delimiters(&self) -> Option<&Delimiters> {
        self.delimiters.as_ref()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ParserConfig`].
///
/// Setters record raw values; all validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ParserConfigBuilder {
    root: String,
    extension: Option<String>,
    delimiters: Option<(String, String)>,
}

impl ParserConfigBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: None,
            delimiters: None,
        }
    }

    /// Set the template extension (`".md"`, `"TEX"`, ...).
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Override the engine's variable delimiters.
    pub fn delimiters(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.delimiters = Some((left.into(), right.into()));
        self
    }

    pub fn build(self) -> Result<ParserConfig, DomainError> {
        if self.root.is_empty() {
            return Err(DomainError::EmptyRoot);
        }

        let extension = match self.extension {
            Some(ext) => normalize_extension(&ext)?,
            None => DEFAULT_TEMPLATE_EXTENSION.to_string(),
        };

        let delimiters = match self.delimiters {
            Some((left, right)) => Delimiters::new(left, right)?,
            None => None,
        };

        Ok(ParserConfig {
            root: self.root,
            extension,
            delimiters,
        })
    }
}

/// Lower-case, ensure a leading dot, reject multi-part suffixes.
///
/// An empty extension is kept as-is: it selects files that have no suffix.
fn normalize_extension(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let lowered = trimmed.to_lowercase();
    let ext = if lowered.starts_with('.') {
        lowered
    } else {
        format!(".{lowered}")
    };

    if ext.len() == 1 {
        return Err(DomainError::InvalidExtension {
            extension: raw.to_string(),
            reason: "a lone '.' matches nothing".into(),
        });
    }
    if ext[1..].contains('.') {
        return Err(DomainError::InvalidExtension {
            extension: raw.to_string(),
            reason: "only the text after the last '.' is compared".into(),
        });
    }
    if ext.contains(['/', '\\']) {
        return Err(DomainError::InvalidExtension {
            extension: raw.to_string(),
            reason: "extensions cannot contain path separators".into(),
        });
    }

    Ok(ext)
}
