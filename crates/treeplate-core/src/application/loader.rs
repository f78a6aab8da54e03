//! Template loader: file bytes in, named compiled template out.

use tracing::{debug, instrument};

use crate::{
    application::ports::{FileSource, TemplateEngine},
    domain::{Delimiters, ParsedTemplate},
    error::{TreeplateError, TreeplateResult},
};

/// Read, decode and compile the template at `path`.
///
/// The template is named after `path`. No writes happen here.
///
/// # Errors
///
/// - `Decode` if the file cannot be read or is not UTF-8
/// - `Syntax` if the engine rejects the body
#[instrument(level = "debug", skip(source, engine, delimiters))]
pub fn load_template(
    source: &dyn FileSource,
    engine: &dyn TemplateEngine,
    path: &str,
    delimiters: Option<&Delimiters>,
) -> TreeplateResult<ParsedTemplate> {
    let bytes = source.read_file(path)?;
    let text = String::from_utf8(bytes).map_err(|e| TreeplateError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let body = engine.compile(path, text, delimiters)?;
    debug!(name = path, "compiled template");
    Ok(ParsedTemplate::new(path, body))
}
