//! JSON export of a validation report.

use std::path::Path;

use adex_validate::{Finding, RuleKey, RunStatus, ValidationReport};
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};

/// Serialisable view of a report with the rule texts inlined.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// `completed` or `short_circuited`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_keys: Option<&'a [String]>,
    pub total_findings: usize,
    pub rules: Vec<JsonRule<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonRule<'a> {
    pub key: RuleKey,
    pub title: &'static str,
    pub instruction: &'static str,
    pub headers: &'static [&'static str],
    pub findings: &'a [Finding],
}

impl<'a> JsonReport<'a> {
    /// All rules in catalog order, including those without findings.
    pub fn new(report: &'a ValidationReport) -> Self {
        let (status, missing_keys) = match &report.status {
            RunStatus::Completed => ("completed", None),
            RunStatus::ShortCircuited { missing_keys } => ("short_circuited", Some(missing_keys.as_slice())),
        };
        Self {
            status,
            missing_keys,
            total_findings: report.total_findings(),
            rules: report
                .results
                .iter()
                .map(|result| JsonRule {
                    key: result.key,
                    title: result.title(),
                    instruction: result.instruction(),
                    headers: result.headers(),
                    findings: &result.findings,
                })
                .collect(),
        }
    }
}

pub fn render_json(report: &ValidationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(report))?)
}

/// Write the JSON report to `path`.
pub fn write_json(path: &Path, report: &ValidationReport) -> Result<()> {
    let text = render_json(report)?;
    std::fs::write(path, text).map_err(|err| ReportError::io(path, err))?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}
