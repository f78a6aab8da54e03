//! Parse Service - turn a template tree into named templates.
//!
//! Walks the configured root, keeps the files whose final suffix matches the
//! configured extension, and compiles each one. Any failure aborts the pass
//! and nothing accumulated so far is returned.

use std::collections::BTreeMap;

use tracing::{info, instrument, trace};

use crate::{
    application::{
        loader::load_template,
        ports::{FileSource, TemplateEngine},
        walker::{CancelToken, Walk},
    },
    domain::{ParsedTemplate, ParserConfig, matches_extension},
    error::{TreeplateError, TreeplateResult},
};

/// Service for parse-only passes.
pub struct ParseService {
    source: Box<dyn FileSource>,
    engine: Box<dyn TemplateEngine>,
    config: ParserConfig,
    cancel: Option<CancelToken>,
}

impl ParseService {
    /// Create a new parse service.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use treeplate_core::application::ParseService;
    ///
    /// let service = ParseService::new(
    ///     source, // impl FileSource
    ///     engine, // impl TemplateEngine
    ///     config, // ParserConfig
    /// );
    /// let templates = service.parse()?;
    /// ```
    pub fn new(
        source: Box<dyn FileSource>,
        engine: Box<dyn TemplateEngine>,
        config: ParserConfig,
    ) -> Self {
        Self {
            source,
            engine,
            config,
            cancel: None,
        }
    }

    /// Attach a cancellation token checked before each directory listing.
    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse every template below the root, in walk order.
    ///
    /// Each template is named after its full root-prefixed path, so files
    /// sharing a base name in different directories stay distinct.
    #[instrument(
        skip_all,
        fields(root = %self.config.root(), ext = %self.config.extension())
    )]
    pub fn parse(&self) -> TreeplateResult<Vec<ParsedTemplate>> {
        let style = self.source.path_style();
        let mut templates = Vec::new();

        for entry in Walk::new(self.source.as_ref(), self.config.root())
            .with_cancel(self.cancel.as_ref())
        {
            let entry = entry?;
            if entry.is_dir {
                continue;
            }

            if !matches_extension(style.file_name(&entry.path), self.config.extension()) {
                trace!(path = %entry.path, "not a template, skipped");
                continue;
            }

            templates.push(load_template(
                self.source.as_ref(),
                self.engine.as_ref(),
                &entry.path,
                self.config.delimiters(),
            )?);
        }

        info!(count = templates.len(), "Parsed templates");
        Ok(templates)
    }

    /// Parse every template and key them by name.
    pub fn parse_map(&self) -> TreeplateResult<BTreeMap<String, ParsedTemplate>> {
        let mut map = BTreeMap::new();
        for template in self.parse()? {
            let name = template.name().to_string();
            if map.insert(name.clone(), template).is_some() {
                return Err(TreeplateError::Internal {
                    message: format!("template name '{name}' produced twice in one pass"),
                });
            }
        }
        Ok(map)
    }
}
