//! Local filesystem adapter using std::fs.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use treeplate_core::{
    application::ports::{DirEntry, FileSource, OutputSink},
    domain::PathStyle,
    error::{TreeplateError, TreeplateResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Paths are joined with the host separator. Symlinks below the root are not
/// followed into: a link to a directory is seen as a file.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSource for LocalFilesystem {
    fn path_style(&self) -> PathStyle {
        PathStyle::Native
    }

    fn is_dir(&self, path: &str) -> TreeplateResult<bool> {
        fs::metadata(path)
            .map(|m| m.is_dir())
            .map_err(|e| traversal_error(path, e, "stat"))
    }

    fn read_dir(&self, path: &str) -> TreeplateResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| traversal_error(path, e, "list directory"))? {
            let entry = entry.map_err(|e| traversal_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| traversal_error(path, e, "read file type"))?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| TreeplateError::Traversal {
                    path: path.to_string(),
                    reason: format!("entry name {raw:?} is not valid UTF-8"),
                })?;
            entries.push(DirEntry::new(name, file_type.is_dir()));
        }
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> TreeplateResult<Vec<u8>> {
        fs::read(path).map_err(|e| TreeplateError::Decode {
            path: path.to_string(),
            reason: format!("Failed to read file: {e}"),
        })
    }

    fn open(&self, path: &str) -> TreeplateResult<Box<dyn Read>> {
        let file = File::open(path).map_err(|e| traversal_error(path, e, "open file"))?;
        Ok(Box::new(file))
    }
}

impl OutputSink for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> TreeplateResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(path)
            .map_err(|e| output_error(path, e, "create directory"))
    }

    fn create_file(&self, path: &Path) -> TreeplateResult<Box<dyn Write>> {
        let file = File::create(path).map_err(|e| output_error(path, e, "create file"))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn traversal_error(path: &str, e: io::Error, operation: &str) -> TreeplateError {
    if e.kind() == io::ErrorKind::NotFound {
        return TreeplateError::NotFound {
            path: path.to_string(),
        };
    }
    TreeplateError::Traversal {
        path: path.to_string(),
        reason: format!("Failed to {}: {}", operation, e),
    }
}

fn output_error(path: &Path, e: io::Error, operation: &str) -> TreeplateError {
    TreeplateError::Output {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
}
