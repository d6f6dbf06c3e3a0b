//! CLI argument definitions for the data lake tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dlt",
    version,
    about = "Data lake tools - standardize file metadata before ingestion",
    long_about = "Standardize data lake file metadata.\n\n\
                  Fills CLIENT_ID, PATIENT_ID and FILE_PATH from the caller's\n\
                  arguments and defaults descriptive fields to UNKNOWN."
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

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow MRNs to appear in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: $DLT_CONFIG).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Standardize a single metadata record and print it as JSON.
    Standardize(StandardizeArgs),

    /// Standardize every row of a batch CSV file.
    Batch(BatchArgs),

    /// Print the pseudonymous patient id for each MRN.
    Hash(HashArgs),
}

#[derive(Args)]
pub struct StandardizeArgs {
    /// Owning client (tenant) identifier.
    #[arg(long = "client-id")]
    pub client_id: String,

    /// File modality, e.g. LAB or IMAGING.
    #[arg(long = "modality")]
    pub modality: Option<String>,

    /// Medical record number, or UNKNOWN.
    #[arg(long = "mrn")]
    pub mrn: String,

    /// Existing metadata as a JSON object.
    #[arg(long = "metadata", value_name = "JSON", conflicts_with = "metadata_file")]
    pub metadata: Option<String>,

    /// Read existing metadata from a JSON file.
    #[arg(long = "metadata-file", value_name = "PATH")]
    pub metadata_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Batch CSV with MODALITY, MRN, METADATA and FILE_PATH columns.
    #[arg(value_name = "BATCH_FILE")]
    pub batch_file: PathBuf,

    /// Owning client (tenant) identifier.
    #[arg(long = "client-id")]
    pub client_id: String,

    /// Write JSON lines here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Owning client (tenant) identifier.
    #[arg(long = "client-id")]
    pub client_id: String,

    /// Medical record numbers to pseudonymize.
    #[arg(value_name = "MRN", required = true)]
    pub mrns: Vec<String>,
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
