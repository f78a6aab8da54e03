//! Tracing setup for the binary.
//!
//! The library crates only emit spans and events; this is the one place a
//! subscriber is installed. Everything goes to stderr so stdout carries
//! results alone.
//!
//! `-q` shows errors, no flag shows warnings, and each `-v` steps through
//! info, debug and trace. A set `RUST_LOG` replaces this mapping.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Targets that receive the flag-selected level; others stay at WARN.
const CRATES: [&str; 3] = ["treeplate", "treeplate_core", "treeplate_adapters"];

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse(directives(level_for(args)))?,
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(args.verbose >= 2)
        .without_time();

    // --output-format json also switches the log lines to JSON
    let installed = if args.output_format == OutputFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    CRATES.map(|krate| format!("{krate}={level}")).join(",")
}
