//! Application layer for treeplate.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ParseService, RenderService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Walker/Loader**: the traversal and compile steps both services share
//!
//! Naming and destination rules live in `crate::domain`.

pub mod loader;
pub mod ports;
pub mod services;
pub mod walker;

pub use services::{ParseService, RenderService};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, FileSource, OutputSink, TemplateEngine};

pub use walker::{CancelToken, Walk};
