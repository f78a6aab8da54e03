//! Render Service - materialise a template tree into an output directory.
//!
//! This service coordinates the render workflow:
//! 1. Walk the source tree
//! 2. Classify each file as template or asset
//! 3. Derive its destination below the output root
//! 4. Execute the template, or stream-copy the asset
//!
//! The first failure ends the pass. Files written before it stay in place.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        loader::load_template,
        ports::{FileSource, OutputSink, TemplateEngine},
        walker::{CancelToken, Walk},
    },
    domain::{
        ParserConfig, RenderJob, RenderReport, destination_for, matches_extension,
        to_data_value,
    },
    error::{TreeplateError, TreeplateResult},
};

/// Service for render passes.
pub struct RenderService {
    source: Box<dyn FileSource>,
    engine: Box<dyn TemplateEngine>,
    sink: Box<dyn OutputSink>,
    config: ParserConfig,
    cancel: Option<CancelToken>,
}

impl RenderService {
    /// Create a new render service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use treeplate_core::application::RenderService;
    ///
    /// let service = RenderService::new(
    ///     source, // impl FileSource
    ///     engine, // impl TemplateEngine
    ///     sink,   // impl OutputSink
    ///     config, // ParserConfig
    /// );
    /// let report = service.render("./out", &data)?;
    /// ```
    pub fn new(
        source: Box<dyn FileSource>,
        engine: Box<dyn TemplateEngine>,
        sink: Box<dyn OutputSink>,
        config: ParserConfig,
    ) -> Self {
        Self {
            source,
            engine,
            sink,
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

    /// List what [`render`](Self::render) would do, without compiling or
    /// writing anything.
    #[instrument(
        skip_all,
        fields(root = %self.config.root(), output = %output_root.as_ref().display())
    )]
    pub fn plan(&self, output_root: impl AsRef<Path>) -> TreeplateResult<RenderReport> {
        let jobs = self.jobs(output_root.as_ref()).collect::<TreeplateResult<Vec<_>>>()?;
        let report = RenderReport { jobs };

        info!(
            templates = report.rendered(),
            assets = report.copied(),
            "Render planned"
        );
        Ok(report)
    }

    /// Render every template and copy every asset below the root into
    /// `output_root`.
    ///
    /// `data` is converted once and handed to every template unchanged.
    /// Existing destination files are overwritten.
    #[instrument(
        skip_all,
        fields(root = %self.config.root(), output = %output_root.as_ref().display())
    )]
    pub fn render<T: Serialize + ?Sized>(
        &self,
        output_root: impl AsRef<Path>,
        data: &T,
    ) -> TreeplateResult<RenderReport> {
        let data = to_data_value(data)?;
        let mut report = RenderReport::default();

        for job in self.jobs(output_root.as_ref()) {
            let job = job?;
            if job.is_template {
                self.render_one(&job, &data)?;
            } else {
                self.copy_one(&job)?;
            }
            report.jobs.push(job);
        }

        info!(
            rendered = report.rendered(),
            copied = report.copied(),
            "Render completed successfully"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Walk the tree and turn every file into a job, in walk order.
    fn jobs<'a>(
        &'a self,
        output_root: &'a Path,
    ) -> impl Iterator<Item = TreeplateResult<RenderJob>> + 'a {
        let style = self.source.path_style();
        let root = self.config.root();
        let ext = self.config.extension();

        Walk::new(self.source.as_ref(), root)
            .with_cancel(self.cancel.as_ref())
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.is_dir => None,
                Ok(entry) => {
                    let is_template = matches_extension(style.file_name(&entry.path), ext);
                    let strip = is_template.then_some(ext);
                    let destination = destination_for(&entry.path, root, strip, output_root, style);
                    Some(Ok(RenderJob {
                        source: entry.path,
                        destination,
                        is_template,
                    }))
                }
                Err(e) => Some(Err(e)),
            })
    }

    fn ensure_parent(&self, destination: &Path) -> TreeplateResult<()> {
        match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.sink.create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn render_one(&self, job: &RenderJob, data: &serde_json::Value) -> TreeplateResult<()> {
        let template = load_template(
            self.source.as_ref(),
            self.engine.as_ref(),
            &job.source,
            self.config.delimiters(),
        )?;

        self.ensure_parent(&job.destination)?;
        let mut out = self.sink.create_file(&job.destination)?;
        template.execute(data, &mut *out)?;
        out.flush().map_err(|e| TreeplateError::Output {
            path: job.destination.clone(),
            reason: e.to_string(),
        })?;

        debug!(from = %job.source, to = %job.destination.display(), "rendered");
        Ok(())
    }

    fn copy_one(&self, job: &RenderJob) -> TreeplateResult<()> {
        let copy_error = |reason: String| TreeplateError::Copy {
            from: job.source.clone(),
            to: job.destination.clone(),
            reason,
        };

        self.ensure_parent(&job.destination)?;
        let mut reader = self
            .source
            .open(&job.source)
            .map_err(|e| copy_error(e.to_string()))?;
        let mut out = self
            .sink
            .create_file(&job.destination)
            .map_err(|e| copy_error(e.to_string()))?;

        let bytes = io::copy(&mut reader, &mut out).map_err(|e| copy_error(e.to_string()))?;
        out.flush().map_err(|e| copy_error(e.to_string()))?;

        debug!(from = %job.source, to = %job.destination.display(), bytes, "copied");
        Ok(())
    }
}
