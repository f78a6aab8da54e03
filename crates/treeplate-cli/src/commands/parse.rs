//! `treeplate parse`: compile every template under a directory and list
//! their names.

use tracing::{info, instrument};

use treeplate_adapters::{LocalFilesystem, MiniJinjaEngine};
use treeplate_core::application::ParseService;

use crate::{
    cli::{GlobalArgs, OutputFormat, ParseArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(dir = %args.dir))]
pub fn execute(
    args: ParseArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let parser = super::parser_config(&args.dir, &args.template, &config)?;
    let service = ParseService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        parser,
    );

    let names: Vec<String> = service
        .parse()?
        .iter()
        .map(|t| t.name().to_owned())
        .collect();
    info!(count = names.len(), "Parsed templates");

    if output.format() == OutputFormat::Json {
        output.json(&names)?;
        return Ok(());
    }

    for name in &names {
        output.result(name)?;
    }
    if names.is_empty() {
        output.info(&format!(
            "No files ending in '{}' under {}",
            service.config().extension(),
            args.dir
        ))?;
    } else if output.format() == OutputFormat::Human {
        output.success(&format!(
            "{} template(s) parsed from {}",
            names.len(),
            args.dir
        ))?;
    }

    Ok(())
}
