//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `treeplate-adapters` crate provides implementations.

use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{CompiledTemplate, Delimiters, PathStyle};
use crate::error::TreeplateResult;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Bare entry name, no separators.
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Port for reading a template tree.
///
/// Implemented by:
/// - `treeplate_adapters::filesystem::LocalFilesystem` (native OS paths)
/// - `treeplate_adapters::filesystem::MemoryFilesystem` (virtual, `/` paths)
///
/// ## Design Notes
///
/// - Paths are strings built with [`FileSource::path_style`]
/// - `read_dir` may return entries in any order; the walker sorts them
/// - A path that does not exist is `TreeplateError::NotFound`; other listing
///   and open failures are `TreeplateError::Traversal`
/// - A failed `read_file` is `TreeplateError::Decode`
#[cfg_attr(test, mockall::automock)]
pub trait FileSource: Send + Sync {
    /// Separator convention used to build paths for this source.
    fn path_style(&self) -> PathStyle;

    /// Whether `path` names a directory.
    fn is_dir(&self, path: &str) -> TreeplateResult<bool>;

    /// List the children of a directory.
    fn read_dir(&self, path: &str) -> TreeplateResult<Vec<DirEntry>>;

    /// Read a whole file.
    fn read_file(&self, path: &str) -> TreeplateResult<Vec<u8>>;

    /// Open a file for streaming reads.
    fn open(&self, path: &str) -> TreeplateResult<Box<dyn Read>>;
}

/// Port for writing rendered output.
///
/// Implemented by:
/// - `treeplate_adapters::filesystem::LocalFilesystem` (production)
/// - `treeplate_adapters::filesystem::MemoryFilesystem` (testing)
pub trait OutputSink: Send + Sync {
    /// Create a directory and all parent directories.
    ///
    /// An already existing directory is not an error.
    fn create_dir_all(&self, path: &Path) -> TreeplateResult<()>;

    /// Create (or truncate) a file for writing.
    ///
    /// The parent directory must already exist. The file is closed when the
    /// returned writer is dropped.
    fn create_file(&self, path: &Path) -> TreeplateResult<Box<dyn Write>>;
}

/// Port for template compilation.
///
/// Implemented by:
/// - `treeplate_adapters::engine::MiniJinjaEngine`
pub trait TemplateEngine: Send + Sync {
    /// Compile `source` into a template called `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - Full path of the template file
    /// * `source` - Decoded template body
    /// * `delimiters` - Variable delimiters replacing the engine defaults
    ///
    /// # Errors
    ///
    /// `TreeplateError::Syntax` when the body does not compile.
    fn compile(
        &self,
        name: &str,
        source: String,
        delimiters: Option<&Delimiters>,
    ) -> TreeplateResult<Box<dyn CompiledTemplate>>;
}
