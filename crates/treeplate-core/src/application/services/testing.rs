//! In-crate fakes for service tests.
//!
//! `FakeSource` is a `/`-separated tree held in a map, `FakeEngine` substitutes
//! `{{Key}}` (or custom-delimited) placeholders, `RecordingSink` keeps written
//! files in memory.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{
    application::ports::{DirEntry, FileSource, OutputSink, TemplateEngine},
    domain::{CompiledTemplate, Delimiters, PathStyle},
    error::{TreeplateError, TreeplateResult},
};

#[derive(Debug, Default, Clone)]
pub struct FakeSource {
    files: BTreeMap<String, Vec<u8>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, path: &str, body: &str) -> Self {
        self.bytes(path, body.as_bytes().to_vec())
    }

    pub fn bytes(mut self, path: &str, body: Vec<u8>) -> Self {
        self.files.insert(path.to_string(), body);
        self
    }

    fn not_found(path: &str) -> TreeplateError {
        TreeplateError::NotFound {
            path: path.to_string(),
        }
    }

    fn has_dir(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.files.keys().any(|k| k.starts_with(&prefix))
    }
}

impl FileSource for FakeSource {
    fn path_style(&self) -> PathStyle {
        PathStyle::Slash
    }

    fn is_dir(&self, path: &str) -> TreeplateResult<bool> {
        if self.files.contains_key(path) {
            Ok(false)
        } else if self.has_dir(path) {
            Ok(true)
        } else {
            Err(Self::not_found(path))
        }
    }

    fn read_dir(&self, path: &str) -> TreeplateResult<Vec<DirEntry>> {
        if !self.has_dir(path) {
            return Err(Self::not_found(path));
        }

        let prefix = format!("{path}/");
        let mut seen = BTreeMap::new();
        for key in self.files.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                match rest.split_once('/') {
                    Some((dir, _)) => seen.insert(dir.to_string(), true),
                    None => seen.insert(rest.to_string(), false),
                };
            }
        }
        // reverse order so the walker has to sort
        Ok(seen
            .into_iter()
            .rev()
            .map(|(name, is_dir)| DirEntry::new(name, is_dir))
            .collect())
    }

    fn read_file(&self, path: &str) -> TreeplateResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| TreeplateError::Decode {
                path: path.to_string(),
                reason: "No such file".into(),
            })
    }

    fn open(&self, path: &str) -> TreeplateResult<Box<dyn Read>> {
        let bytes = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Placeholder substitution engine. A body containing `{{!` does not compile.
pub struct FakeEngine;

struct FakeTemplate {
    name: String,
    body: String,
    left: String,
    right: String,
}

impl TemplateEngine for FakeEngine {
    fn compile(
        &self,
        name: &str,
        source: String,
        delimiters: Option<&Delimiters>,
    ) -> TreeplateResult<Box<dyn CompiledTemplate>> {
        if source.contains("{{!") {
            return Err(TreeplateError::Syntax {
                name: name.to_string(),
                reason: "unexpected '!'".into(),
            });
        }

        let (left, right) = delimiters.map_or(("{{", "}}"), |d| (d.left(), d.right()));
        Ok(Box::new(FakeTemplate {
            name: name.to_string(),
            body: source,
            left: left.to_string(),
            right: right.to_string(),
        }))
    }
}

impl CompiledTemplate for FakeTemplate {
    fn execute(&self, data: &serde_json::Value, out: &mut dyn Write) -> TreeplateResult<()> {
        let mut rendered = String::new();
        let mut rest = self.body.as_str();

        while let Some(start) = rest.find(&self.left) {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + self.left.len()..];
            let Some(end) = after.find(&self.right) else {
                rendered.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let key = after[..end].trim();
            match data.get(key) {
                Some(serde_json::Value::String(s)) => rendered.push_str(s),
                Some(other) => rendered.push_str(&other.to_string()),
                None => {
                    return Err(TreeplateError::Execution {
                        name: self.name.clone(),
                        reason: format!("undefined value '{key}'"),
                    });
                }
            }
            rest = &after[end + self.right.len()..];
        }
        rendered.push_str(rest);

        out.write_all(rendered.as_bytes())
            .map_err(|e| TreeplateError::Execution {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

// ── Sink ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SinkState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// Output sink recording directories and file contents.
///
/// Clones share state, so a test can keep one handle and give the other to
/// a service.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
    fail_on: Option<PathBuf>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_file` fail for `path`.
    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_on = Some(path.into());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .files
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().files.keys().cloned().collect()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }
}

impl OutputSink for RecordingSink {
    fn create_dir_all(&self, path: &Path) -> TreeplateResult<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn create_file(&self, path: &Path) -> TreeplateResult<Box<dyn Write>> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(TreeplateError::Output {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            });
        }

        let mut state = self.state.lock().unwrap();
        let missing_parent = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !state.dirs.contains(p));
        if missing_parent {
            return Err(TreeplateError::Output {
                path: path.to_path_buf(),
                reason: "parent directory does not exist".into(),
            });
        }
        state.files.insert(path.to_path_buf(), Vec::new());

        Ok(Box::new(RecordingWriter {
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct RecordingWriter {
    path: PathBuf,
    state: Arc<Mutex<SinkState>>,
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
