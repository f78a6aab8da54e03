//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `treeplate-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileSource`: Directory listing and file reads (native or virtual)
//!   - `OutputSink`: Directory creation and file writes for rendered output
//!   - `TemplateEngine`: Compiling template bodies
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DirEntry, FileSource, OutputSink, TemplateEngine};

#[cfg(test)]
pub use output::MockFileSource;
