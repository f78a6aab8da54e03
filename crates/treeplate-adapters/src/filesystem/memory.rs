//! In-memory filesystem adapter.
//!
//! Serves embedded template trees and doubles as an output sink for tests.
//! Paths always use `/`, whatever the host OS.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::{self, Cursor, Read, Write},
    path::{Component, Path},
    sync::{Arc, PoisonError, RwLock},
};

use treeplate_core::{
    application::ports::{DirEntry, FileSource, OutputSink},
    domain::PathStyle,
    error::{TreeplateError, TreeplateResult},
};

/// In-memory filesystem.
///
/// Directories are implied by the files below them and can also be created
/// empty through [`OutputSink::create_dir_all`]. Clones share contents.
/// Absolute paths hang off a `/` directory that can itself be walked.
///
/// ```rust
/// use treeplate_adapters::MemoryFilesystem;
/// use treeplate_core::application::ports::FileSource;
///
/// static SITE: &[(&str, &[u8])] = &[
///     ("templates/title.md.tmpl", b"# {{ Title }}"),
///     ("templates/img/logo.png", b"\x89PNG"),
/// ];
///
/// let fs = MemoryFilesystem::from_entries(SITE);
/// assert!(fs.is_dir("templates/img").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<String, Vec<u8>>,
    directories: BTreeSet<String>,
}

impl MemoryFilesystemInner {
    /// Register `key` and every ancestor, up to `/` for absolute keys.
    fn add_directory(&mut self, key: &str) {
        let mut current = key;
        loop {
            self.directories.insert(current.to_string());
            current = match current.rfind('/') {
                Some(0) if current.len() > 1 => "/",
                Some(idx) if idx > 0 => &current[..idx],
                _ => break,
            };
        }
    }

    fn add_file(&mut self, key: String, bytes: Vec<u8>) {
        match key.rfind('/') {
            Some(0) => self.add_directory("/"),
            Some(idx) => self.add_directory(&key[..idx]),
            None => {}
        }
        self.files.insert(key, bytes);
    }

    fn is_dir(&self, key: &str) -> bool {
        if key.is_empty() {
            return !self.files.is_empty() || !self.directories.is_empty();
        }
        self.directories.contains(key)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Build a filesystem from compile-time embedded `(path, bytes)` pairs.
    pub fn from_entries(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        let mut inner = MemoryFilesystemInner::default();
        for (path, bytes) in entries {
            inner.add_file(normalize(path), bytes.to_vec());
        }
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Add a file, replacing any previous contents.
    pub fn insert_file(&self, path: &str, bytes: impl Into<Vec<u8>>) -> TreeplateResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.add_file(normalize(path), bytes.into());
        Ok(())
    }

    /// Builder form of [`insert_file`](Self::insert_file).
    ///
    /// A lock poisoned by a panicking writer is taken over, so the file is
    /// always added.
    pub fn with_file(self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_file(normalize(path), bytes.into());
        self
    }

    /// Contents of a file as text (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.bytes(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Raw contents of a file.
    pub fn bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.get(&path_key(path.as_ref())).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().cloned().collect()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let key = path_key(path.as_ref());
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.contains_key(&key) || inner.directories.contains(&key)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSource for MemoryFilesystem {
    fn path_style(&self) -> PathStyle {
        PathStyle::Slash
    }

    fn is_dir(&self, path: &str) -> TreeplateResult<bool> {
        let key = normalize(path);
        let inner = self.inner.read().map_err(|_| lock_error())?;
        if inner.files.contains_key(&key) {
            Ok(false)
        } else if inner.is_dir(&key) {
            Ok(true)
        } else {
            Err(not_found(path))
        }
    }

    fn read_dir(&self, path: &str) -> TreeplateResult<Vec<DirEntry>> {
        let key = normalize(path);
        let inner = self.inner.read().map_err(|_| lock_error())?;
        if !inner.is_dir(&key) {
            return Err(not_found(path));
        }

        let child_of = |candidate: &str| -> Option<String> {
            let rest = match key.as_str() {
                "" => candidate,
                "/" => candidate.strip_prefix('/')?,
                dir => candidate.strip_prefix(dir)?.strip_prefix('/')?,
            };
            (!rest.is_empty() && !rest.contains('/')).then(|| rest.to_string())
        };

        let dirs = inner
            .directories
            .iter()
            .filter_map(|d| child_of(d.as_str()))
            .map(|name| DirEntry::new(name, true));
        let files = inner
            .files
            .keys()
            .filter_map(|f| child_of(f.as_str()))
            .map(|name| DirEntry::new(name, false));
        Ok(dirs.chain(files).collect())
    }

    fn read_file(&self, path: &str) -> TreeplateResult<Vec<u8>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| TreeplateError::Decode {
                path: path.to_string(),
                reason: "No such file".into(),
            })
    }

    fn open(&self, path: &str) -> TreeplateResult<Box<dyn Read>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        let bytes = inner
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}

impl OutputSink for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> TreeplateResult<()> {
        let key = path_key(path);
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        if inner.files.contains_key(&key) {
            return Err(TreeplateError::Output {
                path: path.to_path_buf(),
                reason: "a file with this name already exists".into(),
            });
        }
        if !key.is_empty() {
            inner.add_directory(&key);
        }
        Ok(())
    }

    fn create_file(&self, path: &Path) -> TreeplateResult<Box<dyn Write>> {
        let key = path_key(path);
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        let parent_missing = key
            .rfind('/')
            .filter(|idx| *idx > 0)
            .is_some_and(|idx| !inner.directories.contains(&key[..idx]));
        if parent_missing {
            return Err(TreeplateError::Output {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            });
        }
        if inner.directories.contains(&key) {
            return Err(TreeplateError::Output {
                path: path.to_path_buf(),
                reason: "a directory with this name already exists".into(),
            });
        }

        inner.files.insert(key.clone(), Vec::new());
        Ok(Box::new(MemoryWriter {
            key,
            inner: Arc::clone(&self.inner),
        }))
    }
}

/// Appends written bytes to one file of the shared map.
struct MemoryWriter {
    key: String,
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))?;
        inner
            .files
            .entry(self.key.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Source-side key: trailing slashes and a bare `.` dropped.
fn normalize(path: &str) -> String {
    let trimmed = path.strip_prefix("./").unwrap_or(path);
    match trimmed.trim_end_matches('/') {
        "." => String::new(),
        "" if trimmed.starts_with('/') => "/".to_string(),
        rest => rest.to_string(),
    }
}

/// Sink-side key: the path's components joined with `/`.
fn path_key(path: &Path) -> String {
    let mut key = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => key.push('/'),
            Component::CurDir => {}
            other => {
                if !key.is_empty() && !key.ends_with('/') {
                    key.push('/');
                }
                key.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    key
}

fn not_found(path: &str) -> TreeplateError {
    TreeplateError::NotFound {
        path: path.to_string(),
    }
}

fn lock_error() -> TreeplateError {
    TreeplateError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
