//! CLI argument definitions for the layout checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "rviz-layout",
    version,
    about = "Check, format and inspect display layout files",
    long_about = "Check, format and inspect display layout files.\n\n\
                  Layouts are parsed into a typed tree, validated against the\n\
                  value domains the host accepts and written back with sorted keys."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse and validate a layout, reporting every error.
    Check(CheckArgs),

    /// Print the canonical serialization of a layout.
    Fmt(FmtArgs),

    /// Print the display tree of a layout.
    Displays(DisplaysArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Layout file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file with validation options.
    #[arg(long = "options", value_name = "JSON")]
    pub options: Option<PathBuf>,

    /// Reject display classes without a schema.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct FmtArgs {
    /// Layout file to format.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rewrite the file in place instead of printing.
    #[arg(long = "write", short = 'w')]
    pub write: bool,
}

#[derive(Parser)]
pub struct DisplaysArgs {
    /// Layout file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Report format choices for `check`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}
