//! Infrastructure adapters for treeplate.
//!
//! This crate implements the ports defined in `treeplate-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod engine;
pub mod filesystem;

// Re-export commonly used adapters
pub use engine::MiniJinjaEngine;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
