//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "treeplate",
    bin_name = "treeplate",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render whole directory trees of templates",
    long_about = "treeplate walks a directory of templates, compiles every file \
                  carrying the template extension, and renders the tree into an \
                  output directory. Other files are copied unchanged.",
    after_help = "EXAMPLES:\n\
        \x20 treeplate parse templates/markdown\n\
        \x20 treeplate render templates/markdown out --data book.toml\n\
        \x20 treeplate render templates/latex out --delims '\\{\\{' '\\}\\}' --set Name=Frank\n\
        \x20 treeplate completions bash > /usr/share/bash-completion/completions/treeplate",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse every template in a directory tree.
    #[command(
        visible_alias = "p",
        about = "Parse every template and list their names",
        after_help = "EXAMPLES:\n\
            \x20 treeplate parse templates\n\
            \x20 treeplate parse templates --ext .md\n\
            \x20 treeplate parse templates --output-format json"
    )]
    Parse(ParseArgs),

    /// Render a directory tree into an output directory.
    #[command(
        visible_alias = "r",
        about = "Render templates and copy assets into an output directory",
        after_help = "EXAMPLES:\n\
            \x20 treeplate render templates out --data data.json\n\
            \x20 treeplate render templates out --set Title=Guide --set Author=Ann\n\
            \x20 treeplate render templates out --dry-run"
    )]
    Render(RenderArgs),

    /// Initialise a treeplate configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 treeplate init                     # platform config directory\n\
            \x20 treeplate --config ./tp.toml init  # explicit location\n\
            \x20 treeplate init --force             # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 treeplate completions bash > ~/.local/share/bash-completion/completions/treeplate\n\
            \x20 treeplate completions zsh  > ~/.zfunc/_treeplate\n\
            \x20 treeplate completions fish > ~/.config/fish/completions/treeplate.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared template options ──────────────────────────────────────────────────

/// Options describing how templates are recognised and compiled.
#[derive(Debug, Clone, Default, Args)]
pub struct TemplateArgs {
    /// Template file extension (overrides `templates.extension`).
    #[arg(
        short = 'e',
        long = "ext",
        value_name = "EXT",
        help = "Template file extension, e.g. .tmpl or .md"
    )]
    pub ext: Option<String>,

    /// Variable delimiters replacing `{{` and `}}`.
    #[arg(
        short = 'd',
        long = "delims",
        num_args = 2,
        value_names = ["LEFT", "RIGHT"],
        allow_hyphen_values = true,
        help = "Left and right variable delimiters"
    )]
    pub delims: Option<Vec<String>>,
}

// ── parse ─────────────────────────────────────────────────────────────────────

/// Arguments for `treeplate parse`.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Template directory (or a single template file).
    #[arg(value_name = "DIR")]
    pub dir: String,

    #[command(flatten)]
    pub template: TemplateArgs,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `treeplate render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template directory (or a single template file).
    #[arg(value_name = "DIR")]
    pub dir: String,

    /// Output directory; created if missing.
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    #[command(flatten)]
    pub template: TemplateArgs,

    /// Data file handed to every template (`.json` or `.toml`).
    #[arg(long = "data", value_name = "FILE", help = "JSON or TOML data file")]
    pub data: Option<PathBuf>,

    /// Top-level string values, applied after the data file.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a top-level string value (repeatable)"
    )]
    pub set: Vec<String>,

    /// Show what would be written without writing any files.
    #[arg(long = "dry-run", help = "List what would be rendered and copied")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `treeplate init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `treeplate completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
