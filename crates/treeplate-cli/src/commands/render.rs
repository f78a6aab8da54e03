//! `treeplate render`: render a template tree into an output directory.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use treeplate_adapters::{LocalFilesystem, MiniJinjaEngine};
use treeplate_core::{application::RenderService, domain::RenderReport};

use crate::{
    cli::{GlobalArgs, OutputFormat, RenderArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(dir = %args.dir, out = %args.out.display()))]
pub fn execute(
    args: RenderArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let parser = super::parser_config(&args.dir, &args.template, &config)?;
    let data = load_data(args.data.as_deref(), &args.set)?;
    debug!(data = %data, "Template data loaded");

    let service = RenderService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        Box::new(LocalFilesystem::new()),
        parser,
    );

    let report = if args.dry_run {
        service.plan(&args.out)?
    } else {
        service.render(&args.out, &data)?
    };
    info!(
        rendered = report.rendered(),
        copied = report.copied(),
        dry_run = args.dry_run,
        "Render finished"
    );

    print_report(&report, &args, &output)
}

fn print_report(report: &RenderReport, args: &RenderArgs, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }

    if args.dry_run {
        output.header("Dry run, nothing written:")?;
        for job in &report.jobs {
            let verb = if job.is_template { "render" } else { "copy" };
            output.result(&format!(
                "{verb:<6} {} -> {}",
                job.source,
                job.destination.display()
            ))?;
        }
        return Ok(());
    }

    for job in &report.jobs {
        output.result(&job.destination.display().to_string())?;
    }
    if output.format() == OutputFormat::Human {
        output.success(&format!(
            "Rendered {} template(s) and copied {} file(s) into {}",
            report.rendered(),
            report.copied(),
            args.out.display()
        ))?;
    }

    Ok(())
}

/// Build the value handed to every template.
///
/// Starts from the `--data` file (an empty object without one), then
/// applies each `--set KEY=VALUE` as a top-level string.
pub(crate) fn load_data(file: Option<&Path>, pairs: &[String]) -> CliResult<Value> {
    let mut data = match file {
        Some(path) => read_data_file(path)?,
        None => Value::Object(Map::new()),
    };

    if pairs.is_empty() {
        return Ok(data);
    }

    let Value::Object(map) = &mut data else {
        return Err(CliError::InvalidInput {
            message: "--set needs the data file to hold a table/object at the top level".into(),
            source: None,
        });
    };

    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| CliError::InvalidInput {
            message: format!("expected KEY=VALUE, got '{pair}'"),
            source: None,
        })?;
        if key.is_empty() {
            return Err(CliError::InvalidInput {
                message: format!("empty key in '{pair}'"),
                source: None,
            });
        }
        map.insert(key.to_owned(), Value::String(value.to_owned()));
    }

    Ok(data)
}

fn read_data_file(path: &Path) -> CliResult<Value> {
    let data_error = |message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>| {
        CliError::DataFile {
            path: path.to_path_buf(),
            message,
            source,
        }
    };

    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let text = std::fs::read_to_string(path)
        .map_err(|e| data_error(e.to_string(), Some(Box::new(e))))?;

    match format.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .map_err(|e| data_error(format!("invalid JSON: {e}"), Some(Box::new(e)))),
        Some("toml") => toml::from_str::<Value>(&text)
            .map_err(|e| data_error(format!("invalid TOML: {e}"), Some(Box::new(e)))),
        _ => Err(data_error(
            "unsupported format, expected .json or .toml".into(),
            None,
        )),
    }
}
