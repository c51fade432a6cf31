//! CLI argument definitions for the follow-up engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use followup_model::Endpoint;
use followup_report::OutputFormat;

#[derive(Parser)]
#[command(
    name = "followup",
    version,
    about = "Longitudinal follow-up engine - turn visit snapshots into survival outcomes",
    long_about = "Merge per-visit follow-up tables into one timeline per patient.\n\n\
                  Extracts clinical events and procedures, resolves their first occurrence\n\
                  and computes event flags and survival times for a chosen endpoint."
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
    /// Process a folder of follow-up tables and write outcome files.
    Process(ProcessArgs),

    /// Compare event rates and survival across all endpoints.
    Compare(CompareArgs),

    /// List the supported endpoints.
    Endpoints,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Folder with one CSV file per table (baseline plus one per time point).
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Endpoint to evaluate.
    #[arg(long = "endpoint", value_enum, default_value = "death")]
    pub endpoint: EndpointArg,

    /// Output directory for generated files (default: <INPUT_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Outcome file format to generate.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Patient group tag for output file names (default: detected from the
    /// input folder name as pci, cag or patients).
    #[arg(long = "group", value_name = "LABEL")]
    pub group: Option<String>,

    /// Skip the reduced survival dataset.
    #[arg(long = "no-survival-dataset")]
    pub no_survival_dataset: bool,

    /// Substring identifying the baseline table (repeatable, checked in order).
    #[arg(long = "baseline-marker", value_name = "MARKER")]
    pub baseline_markers: Vec<String>,

    /// Process subjects on a single thread.
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Process and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Folder with one CSV file per table (baseline plus one per time point).
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Substring identifying the baseline table (repeatable, checked in order).
    #[arg(long = "baseline-marker", value_name = "MARKER")]
    pub baseline_markers: Vec<String>,
}

/// CLI endpoint choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EndpointArg {
    Death,
    Mace,
    Mi,
    Angina,
    HeartFailure,
    Revascularization,
    Hospitalization,
    AnyEvent,
}

impl From<EndpointArg> for Endpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::Death => Endpoint::Death,
            EndpointArg::Mace => Endpoint::Mace,
            EndpointArg::Mi => Endpoint::Mi,
            EndpointArg::Angina => Endpoint::Angina,
            EndpointArg::HeartFailure => Endpoint::HeartFailure,
            EndpointArg::Revascularization => Endpoint::Revascularization,
            EndpointArg::Hospitalization => Endpoint::Hospitalization,
            EndpointArg::AnyEvent => Endpoint::AnyEvent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
    Both,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Both => OutputFormat::Both,
        }
    }
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
