//! Command handlers. Each translates parsed arguments into a core service
//! call and prints the outcome; no template logic lives here.

pub mod completions;
pub mod init;
pub mod parse;
pub mod render;

use treeplate_core::{domain::ParserConfig, error::TreeplateError};

use crate::{
    cli::TemplateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Merge command-line template options over the configured ones.
///
/// Flags win over the config file. Delimiters are only applied when at
/// least one side is non-empty, so a half-filled config pair is reported
/// by core validation instead of silently ignored.
pub(crate) fn parser_config(
    dir: &str,
    args: &TemplateArgs,
    config: &AppConfig,
) -> CliResult<ParserConfig> {
    let extension = args
        .ext
        .clone()
        .unwrap_or_else(|| config.templates.extension.clone());

    let (left, right) = match args.delims.as_deref() {
        Some([left, right]) => (left.clone(), right.clone()),
        _ => (
            config.templates.left_delimiter.clone(),
            config.templates.right_delimiter.clone(),
        ),
    };

    let mut builder = ParserConfig::builder(dir).extension(extension);
    if !left.is_empty() || !right.is_empty() {
        builder = builder.delimiters(left, right);
    }

    builder
        .build()
        .map_err(|e| CliError::Core(TreeplateError::Domain(e)))
}
