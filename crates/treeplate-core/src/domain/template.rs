//! Parsed templates handed back to callers.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::error::{TreeplateError, TreeplateResult};

/// Engine-specific compiled body.
///
/// Implemented by template engine adapters; the core only ever executes it.
pub trait CompiledTemplate: Send + Sync {
    /// Execute against `data`, streaming output into `out`.
    fn execute(&self, data: &serde_json::Value, out: &mut dyn Write) -> TreeplateResult<()>;
}

/// A named, compiled template.
///
/// The name is the source file's full root-prefixed path, unique within one
/// parse pass. Owned exclusively by the caller.
pub struct ParsedTemplate {
    name: String,
    body: Box<dyn CompiledTemplate>,
}

impl ParsedTemplate {
    pub fn new(name: impl Into<String>, body: Box<dyn CompiledTemplate>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute into a writer with an already-converted data value.
    pub fn execute(&self, data: &serde_json::Value, out: &mut dyn Write) -> TreeplateResult<()> {
        self.body.execute(data, out)
    }

    /// Execute into a `String`.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> TreeplateResult<String> {
        let value = to_data_value(data)?;
        let mut buf = Vec::new();
        self.execute(&value, &mut buf)?;
        String::from_utf8(buf).map_err(|e| TreeplateError::Execution {
            name: self.name.clone(),
            reason: format!("output is not valid UTF-8: {e}"),
        })
    }
}

impl fmt::Debug for ParsedTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Convert caller data into the value every template receives.
pub fn to_data_value<T: Serialize + ?Sized>(data: &T) -> TreeplateResult<serde_json::Value> {
    serde_json::to_value(data).map_err(|e| TreeplateError::InvalidData {
        reason: e.to_string(),
    })
}
