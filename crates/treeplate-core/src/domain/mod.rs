// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for treeplate.
//!
//! This module contains the pure rules of the engine: configuration, naming,
//! destination derivation, and the values a pass produces. All I/O and the
//! template language itself are reached through ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: configs and parsed templates are never mutated

pub mod config;
pub mod entry;
pub mod error;
pub mod paths;
pub mod template;

pub use config::{DEFAULT_TEMPLATE_EXTENSION, Delimiters, ParserConfig, ParserConfigBuilder};
pub use entry::{FileEntry, RenderJob, RenderReport};
pub use error::{DomainError, ErrorCategory};
pub use paths::{PathStyle, destination_for, extension_of, matches_extension, relative_to_root};
pub use template::{CompiledTemplate, ParsedTemplate, to_data_value};
