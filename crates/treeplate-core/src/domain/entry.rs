//! Transient values produced while walking a template tree.

use std::path::PathBuf;

use serde::Serialize;

/// One entry reached by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Root-prefixed path, joined with the source's separator.
    pub path: String,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// What a render pass does with one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderJob {
    pub source: String,
    pub destination: PathBuf,
    /// `true`: execute as a template. `false`: copy bytes unchanged.
    pub is_template: bool,
}

/// Jobs completed by a successful render, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub jobs: Vec<RenderJob>,
}

impl RenderReport {
    pub fn rendered(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_template).count()
    }

    pub fn copied(&self) -> usize {
        self.jobs.iter().filter(|j| !j.is_template).count()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
