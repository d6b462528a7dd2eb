//! Fetch, validate and export: the stages behind `adex-audit validate`.

use std::path::{Path, PathBuf};

use adex_fetch::{DirectorySource, FetchError, HttpSource, ReleaseUrls, SnapshotSource, collect_snapshots};
use adex_model::Snapshots;
use adex_report::{
    CSV_FILE_NAME, CsvQuoting, PDF_FILE_NAME, ReportError, ReportMetadata, annotate, write_csv, write_json,
    write_pdf,
};
use adex_validate::{ValidationError, ValidationOptions, ValidationReport, run_validation};
use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, info_span};

/// Run completed without findings.
pub const EXIT_CLEAN: i32 = 0;
/// Run completed with findings.
pub const EXIT_FINDINGS: i32 = 1;
/// The reference package is absent; no report was produced.
pub const EXIT_FATAL: i32 = 2;
/// Any other failure.
pub const EXIT_ERROR: i32 = 3;

/// Default JSON export file name.
pub const JSON_FILE_NAME: &str = "gf_adex_validation.json";

/// Where snapshots are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    Directory(PathBuf),
    Server {
        url: String,
        token: Option<String>,
        releases: ReleaseUrls,
    },
}

impl SourceSelection {
    pub fn open(&self) -> Result<Box<dyn SnapshotSource>> {
        match self {
            Self::Directory(dir) => {
                if !dir.is_dir() {
                    bail!("snapshot directory {} does not exist", dir.display());
                }
                Ok(Box::new(DirectorySource::new(dir)))
            }
            Self::Server { url, token, releases } => {
                let source = HttpSource::new(url.as_str(), token.as_deref(), releases.clone())
                    .with_context(|| format!("connect to {url}"))?;
                Ok(Box::new(source))
            }
        }
    }
}

/// Requested export files. A directory gets the default file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exports {
    pub csv: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub csv_quoting: CsvQuoting,
}

impl Exports {
    pub fn is_empty(&self) -> bool {
        self.csv.is_none() && self.pdf.is_none() && self.json.is_none()
    }
}

/// Snapshots and the report of one completed run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub snapshots: Snapshots,
    pub report: ValidationReport,
}

impl AuditOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.report.has_findings() {
            EXIT_FINDINGS
        } else {
            EXIT_CLEAN
        }
    }
}

/// Collect snapshots from `source` and validate them.
///
/// Fails with [`ValidationError`] when the reference package is absent.
pub fn run_audit(source: &dyn SnapshotSource, options: &ValidationOptions, app_key: &str) -> Result<AuditOutcome> {
    let snapshots = collect_snapshots(source, app_key);
    let report = run_validation(&snapshots, options)?;
    Ok(AuditOutcome { snapshots, report })
}

/// Write the requested exports of a completed run; returns the written paths.
pub fn write_exports(outcome: &AuditOutcome, options: &ValidationOptions, exports: &Exports) -> Result<Vec<PathBuf>> {
    let _span = info_span!("render").entered();
    let mut written = Vec::new();
    let snapshots = &outcome.snapshots;

    if let Some(target) = &exports.csv {
        let path = resolve_export_path(target, CSV_FILE_NAME);
        let annotated = annotate(
            snapshots.indicators(),
            snapshots.operands.as_deref().unwrap_or_default(),
            snapshots.data_elements.as_deref().unwrap_or_default(),
            snapshots.data_sets.as_deref().unwrap_or_default(),
        );
        write_csv(&path, snapshots, &annotated, exports.csv_quoting)
            .with_context(|| format!("write CSV export {}", path.display()))?;
        written.push(path);
    }
    if let Some(target) = &exports.pdf {
        let path = resolve_export_path(target, PDF_FILE_NAME);
        let metadata = ReportMetadata::from_snapshots(snapshots, options, Local::now());
        write_pdf(&path, &metadata, &outcome.report)
            .with_context(|| format!("write PDF export {}", path.display()))?;
        written.push(path);
    }
    if let Some(target) = &exports.json {
        let path = resolve_export_path(target, JSON_FILE_NAME);
        write_json(&path, &outcome.report).with_context(|| format!("write JSON export {}", path.display()))?;
        written.push(path);
    }

    info!(count = written.len(), "Exports written");
    Ok(written)
}

/// `target` itself, or `target/<default_name>` when it is an existing directory.
pub fn resolve_export_path(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

/// Exit code for a failed run.
pub fn exit_code_for_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ValidationError>() {
        Some(err) if err.is_fatal() => EXIT_FATAL,
        _ => EXIT_ERROR,
    }
}

/// Message shown on stderr for a failed run.
///
/// Fetch and export failures are followed by a hint on the next line.
pub fn error_message(error: &anyhow::Error) -> String {
    if let Some(err) = error.downcast_ref::<ValidationError>() {
        return err.user_message().to_string();
    }
    let hint = error
        .downcast_ref::<FetchError>()
        .map(FetchError::user_message)
        .or_else(|| error.downcast_ref::<ReportError>().map(ReportError::suggestion));
    match hint {
        Some(hint) => format!("{error:#}\n{hint}"),
        None => format!("{error:#}"),
    }
}
