//! Terminal output for command results and status lines.
//!
//! Results (template names, planned jobs, JSON documents) go to stdout and
//! are never suppressed. Status lines are decorations that `--quiet` hides.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const CHECK: &str = "\u{2713}";
const WARN: &str = "\u{26a0}";
const INFO: &str = "\u{2139}";

/// Writes command output according to the resolved format.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        // colour only ever applies to human output
        let color = format == OutputFormat::Human && !args.no_color && !config.output.no_color;

        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    /// A result line. Printed in every mode, quiet included.
    pub fn result(&self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    /// Serialize `value` as pretty JSON on stdout.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(CHECK, Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(WARN, Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(INFO, Style::new().blue(), msg)
    }

    /// Bold section header.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            text.style(Style::new().cyan().bold()).to_string()
        } else {
            text.to_owned()
        };
        self.term.write_line(&line)
    }

    fn status(&self, symbol: &str, style: Style, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate(symbol, style, msg))
    }

    fn decorate(&self, symbol: &str, style: Style, msg: &str) -> String {
        if self.color {
            format!("{} {}", symbol.style(style.bold()), msg.style(style))
        } else {
            format!("{symbol} {msg}")
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Resolved format; never [`OutputFormat::Auto`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
