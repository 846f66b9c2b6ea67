//! CLI argument definitions for the Aurora import tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aurora",
    version,
    about = "Aurora data import tools - map, validate, and transform tabular data",
    long_about = "Map imported CSV columns onto a destination schema, inspect and\n\
                  type-profile files before import, and work with Aurora formulas\n\
                  (tokenize, highlight, validate, evaluate)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a CSV file onto a schema and write the projected output.
    Import(ImportArgs),

    /// Profile a CSV file: column statistics and inferred types.
    Inspect(InspectArgs),

    /// Tokenize a formula and print the token stream.
    Tokens(TokensArgs),

    /// Render a formula as syntax-highlighted HTML.
    Highlight(HighlightArgs),

    /// Evaluate a formula, optionally against a row context.
    Eval(EvalArgs),

    /// List the built-in formula functions.
    Functions(FunctionsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Destination schema as a JSON array of column definitions.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: PathBuf,

    /// Where to write the projected CSV (default: print a summary only).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Similarity a column pair must strictly exceed to be auto-mapped.
    #[arg(long = "threshold", value_name = "SCORE", default_value_t = aurora_map::ACCEPT_THRESHOLD)]
    pub threshold: f64,

    /// Map and validate without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the output even when validation reports errors.
    #[arg(long = "force")]
    pub force: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the CSV file to profile.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct TokensArgs {
    /// The formula to tokenize.
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct HighlightArgs {
    /// The formula to render.
    #[arg(value_name = "FORMULA")]
    pub formula: String,
}

#[derive(Parser)]
pub struct EvalArgs {
    /// The formula to evaluate.
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    /// Row context as a JSON object of column values.
    #[arg(long = "context", value_name = "JSON")]
    pub context: Option<String>,
}

#[derive(Parser)]
pub struct FunctionsArgs {
    /// Only list functions in this category.
    #[arg(long = "category", value_enum)]
    pub category: Option<CategoryArg>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Math,
    String,
    Date,
    Logic,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
