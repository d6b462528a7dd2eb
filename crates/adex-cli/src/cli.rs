//! CLI argument definitions for `adex-audit`.

use std::path::PathBuf;

use adex_report::CsvQuoting;
use adex_validate::{PeriodConflictMode, VersionPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "adex-audit",
    version,
    about = "Audit GF ADEx data exchange and indicator configuration",
    long_about = "Audit the GF ADEx configuration of a DHIS2 instance.\n\n\
                  Checks data exchanges, requests and indicators against the rules of the\n\
                  Global Fund data exchange and exports the findings as CSV, PDF or JSON."
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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: adex-audit.toml in the user config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every validation rule and print the report.
    Validate(ValidateArgs),

    /// List the validation rules in report order.
    Rules,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Read snapshots from a directory of JSON exports.
    #[arg(long = "source-dir", value_name = "DIR", conflicts_with = "server")]
    pub source_dir: Option<PathBuf>,

    /// DHIS2 base URL to fetch snapshots from (without /api).
    #[arg(long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// Environment variable holding the API token.
    #[arg(long = "token-env", value_name = "VAR")]
    pub token_env: Option<String>,

    /// Latest-release endpoint of the metadata package.
    #[arg(long = "package-release-url", value_name = "URL")]
    pub package_release_url: Option<String>,

    /// Latest-release endpoint of the app.
    #[arg(long = "app-release-url", value_name = "URL")]
    pub app_release_url: Option<String>,

    /// Write the indicator configuration CSV (file or directory).
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the PDF report (file or directory).
    #[arg(long = "pdf", value_name = "PATH")]
    pub pdf: Option<PathBuf>,

    /// Write the report as JSON (file or directory).
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Quoting of the CSV export.
    #[arg(long = "csv-quoting", value_enum)]
    pub csv_quoting: Option<CsvQuotingArg>,

    /// What to do with version strings that cannot be parsed.
    #[arg(long = "version-policy", value_enum)]
    pub version_policy: Option<VersionPolicyArg>,

    /// How indicators in several period types are reported.
    #[arg(long = "period-conflicts", value_enum)]
    pub period_conflicts: Option<PeriodConflictArg>,

    /// Print only the summary table, not the findings of each rule.
    #[arg(long = "summary-only")]
    pub summary_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CsvQuotingArg {
    Legacy,
    Rfc4180,
}

impl From<CsvQuotingArg> for CsvQuoting {
    fn from(arg: CsvQuotingArg) -> Self {
        match arg {
            CsvQuotingArg::Legacy => Self::Legacy,
            CsvQuotingArg::Rfc4180 => Self::Rfc4180,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VersionPolicyArg {
    Skip,
    Report,
}

impl From<VersionPolicyArg> for VersionPolicy {
    fn from(arg: VersionPolicyArg) -> Self {
        match arg {
            VersionPolicyArg::Skip => Self::Skip,
            VersionPolicyArg::Report => Self::Report,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodConflictArg {
    PerIndicator,
    PerBucketPair,
}

impl From<PeriodConflictArg> for PeriodConflictMode {
    fn from(arg: PeriodConflictArg) -> Self {
        match arg {
            PeriodConflictArg::PerIndicator => Self::PerIndicator,
            PeriodConflictArg::PerBucketPair => Self::PerBucketPair,
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
