//! CLI argument definitions for the extract preparation tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "ipums-prep",
    version,
    about = "Prepare fixed-width census extracts for loading into a relational database",
    long_about = "Prepare fixed-width census microdata extracts for bulk loading.\n\n\
                  Reads the SPSS syntax file shipped with an extract and produces\n\
                  create table statements, variable and value label lookup files,\n\
                  and tab-delimited data (one file per record type)."
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
    /// Print create table statements for the extract to stdout.
    Ddl(DdlArgs),

    /// Write variable names and labels as tab-delimited text.
    Vars(LabelArgs),

    /// Write coded value labels as tab-delimited text.
    Vals(LabelArgs),

    /// Convert the fixed-width raw data to tab-delimited text.
    Data(DataArgs),
}

#[derive(Parser)]
pub struct DdlArgs {
    /// SPSS syntax file describing the extract.
    #[arg(value_name = "SYNTAX")]
    pub syntax: PathBuf,

    /// Table name for flat extracts. Hierarchical extracts use one table
    /// per record type.
    #[arg(long = "table-name", value_name = "NAME", default_value = "ipumsdata")]
    pub table_name: String,
}

#[derive(Parser)]
pub struct LabelArgs {
    /// SPSS syntax file describing the extract.
    #[arg(value_name = "SYNTAX")]
    pub syntax: PathBuf,

    /// Destination file for the tab-delimited labels.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct DataArgs {
    /// SPSS syntax file describing the extract.
    #[arg(value_name = "SYNTAX")]
    pub syntax: PathBuf,

    /// Raw data file (gzip or plain text).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Destination file. Hierarchical extracts write `<stem>_<type>.<ext>`
    /// next to it, one file per record type.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Stop after this many raw records (0 reads everything).
    #[arg(value_name = "MAXROWS")]
    pub max_rows: Option<u64>,

    /// Hide the progress spinner.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
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

impl Cli {
    /// Logging configuration from the global flags.
    ///
    /// `--log-level` beats `-v`/`-q`; `RUST_LOG` is honoured only when
    /// neither is given.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            level_filter: self.verbosity.tracing_level_filter(),
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            ..LogConfig::default()
        };
        if let Some(level) = self.log_level {
            config.level_filter = match level {
                LogLevelArg::Error => LevelFilter::ERROR,
                LogLevelArg::Warn => LevelFilter::WARN,
                LogLevelArg::Info => LevelFilter::INFO,
                LogLevelArg::Debug => LevelFilter::DEBUG,
                LogLevelArg::Trace => LevelFilter::TRACE,
            };
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}
