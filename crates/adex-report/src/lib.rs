//! Renderers for ADEx validation reports.
//!
//! Everything here consumes a finished [`ValidationReport`](adex_validate::ValidationReport)
//! together with the snapshots it was computed from:
//!
//! - [`summary`]: terminal summary and detail tables
//! - [`config_csv`]: the indicator configuration CSV
//! - [`pdf`]: the PDF report
//! - [`json`]: a machine-readable copy of the report
//!
//! Formula [`annotate`]ion only feeds the CSV numerator column; validation
//! never sees annotated text.

pub mod annotate;
pub mod config_csv;
pub mod error;
pub mod json;
pub mod pdf;
pub mod summary;

pub use annotate::{NameMaps, annotate};
pub use config_csv::{CSV_FILE_NAME, CSV_HEADERS, CsvQuoting, csv_rows, render_csv, write_csv};
pub use error::{ReportError, Result};
pub use json::{JsonReport, render_json, write_json};
pub use pdf::{
    FontStyle, PDF_FILE_NAME, PdfLayout, PdfPage, ReportMetadata, TextLine, build_layout, render_pdf,
    wrap_text, write_pdf,
};
pub use summary::{catalog_table, detail_table, print_details, print_summary, summary_table};
