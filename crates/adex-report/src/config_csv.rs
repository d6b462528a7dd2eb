//! Indicator configuration CSV.
//!
//! One row per (exchange, request, indicator) triple in declaration order.

use std::path::Path;

use adex_model::{Indicator, Snapshots, UNKNOWN};
use adex_validate::classify_mixed;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, Result};

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 8] = [
    "ex_uid",
    "exchange_name",
    "request_name",
    "Code",
    "Short Name",
    "Indicator name",
    "Period type",
    "Numerator",
];

pub const CSV_FILE_NAME: &str = "gf_indicator_config.csv";

/// How fields are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvQuoting {
    /// Every field wrapped in double quotes; embedded quotes are not escaped.
    #[default]
    Legacy,
    /// Quotes only where needed, with embedded quotes doubled.
    Rfc4180,
}

/// Build the CSV rows: code, names and numerator are looked up per indicator id.
///
/// Numerators come from `annotated`; the other indicator columns from the
/// fetched indicators. Unresolvable ids render as `UNKNOWN`.
pub fn csv_rows(snapshots: &Snapshots, annotated: &[Indicator]) -> Vec<[String; 8]> {
    let mut rows = Vec::new();
    for exchange in snapshots.exchanges() {
        for request in exchange.requests() {
            let period_type = classify_mixed(&request.pe);
            for id in &request.dx {
                let indicator = snapshots.indicator(id);
                let numerator = annotated
                    .iter()
                    .find(|candidate| candidate.id == *id)
                    .map_or(UNKNOWN, |candidate| candidate.numerator.as_str());
                rows.push([
                    exchange.id.clone(),
                    exchange.name.clone(),
                    request.name.clone(),
                    indicator
                        .and_then(|i| i.code.as_deref())
                        .unwrap_or(UNKNOWN)
                        .to_string(),
                    indicator
                        .and_then(|i| i.short_name.as_deref())
                        .unwrap_or(UNKNOWN)
                        .to_string(),
                    indicator.map_or(UNKNOWN, |i| i.name.as_str()).to_string(),
                    period_type.label().to_string(),
                    numerator.to_string(),
                ]);
            }
        }
    }
    rows
}

/// Render the configuration CSV as text.
pub fn render_csv(snapshots: &Snapshots, annotated: &[Indicator], quoting: CsvQuoting) -> Result<String> {
    let rows = csv_rows(snapshots, annotated);
    match quoting {
        CsvQuoting::Legacy => Ok(render_legacy(&rows)),
        CsvQuoting::Rfc4180 => render_rfc4180(&rows),
    }
}

fn render_legacy(rows: &[[String; 8]]) -> String {
    let mut lines = vec![quote_line(CSV_HEADERS)];
    lines.extend(rows.iter().map(|row| quote_line(row.iter().map(String::as_str))));
    lines.join("\n")
}

fn quote_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(",")
}

fn render_rfc4180(rows: &[[String; 8]]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the configuration CSV to `path`.
pub fn write_csv(
    path: &Path,
    snapshots: &Snapshots,
    annotated: &[Indicator],
    quoting: CsvQuoting,
) -> Result<()> {
    let text = render_csv(snapshots, annotated, quoting)?;
    std::fs::write(path, text).map_err(|err| ReportError::io(path, err))?;
    info!(path = %path.display(), "Wrote configuration CSV");
    Ok(())
}
