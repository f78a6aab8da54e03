//! Treeplate Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for treeplate: a
//! recursive walker over a directory of templates that compiles every
//! template under a collision-free name and renders the whole tree into an
//! output directory, copying non-template assets alongside.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          treeplate-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (ParseService, RenderService)       │
//! │      Walker → Loader → Renderer         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (FileSource, OutputSink, TemplateEngine)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    treeplate-adapters (Infrastructure)  │
//! │ (LocalFilesystem, MemoryFilesystem,     │
//! │  MiniJinjaEngine)                       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ParserConfig, naming and destinations) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use treeplate_core::prelude::*;
//!
//! // 1. Describe the template directory
//! let config = ParserConfig::builder("./templates/markdown")
//!     .extension(".tmpl")
//!     .build()?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = RenderService::new(source, engine, sink, config);
//! let report = service.render("./output", &serde_json::json!({ "Name": "Frank" }))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancelToken, ParseService, RenderService,
        ports::{DirEntry, FileSource, OutputSink, TemplateEngine},
    };
    pub use crate::domain::{
        CompiledTemplate, DEFAULT_TEMPLATE_EXTENSION, Delimiters, ParsedTemplate, ParserConfig,
        ParserConfigBuilder, PathStyle, RenderJob, RenderReport,
    };
    pub use crate::error::{TreeplateError, TreeplateResult};
}
