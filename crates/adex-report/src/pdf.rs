//! PDF validation report.
//!
//! Rendering is split in two stages. [`build_layout`] places every text run
//! on A4 pages (coordinates in millimetres from the top-left corner) and is
//! fully deterministic. [`render_pdf`] turns the layout into PDF bytes with
//! the built-in Helvetica faces.

use std::path::Path;

use adex_model::{Snapshots, UNKNOWN};
use adex_validate::{RuleResult, ValidationOptions, ValidationReport, distinct_implementer_types};
use chrono::{DateTime, Local};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use serde::Serialize;
use tracing::{info, info_span};

use crate::error::{ReportError, Result};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_MM: f32 = 15.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const META_X_MM: f32 = 20.0;
const META_WIDTH_MM: f32 = PAGE_WIDTH_MM - META_X_MM - MARGIN_MM;
const META_LINE_SPACING_MM: f32 = 10.0;
const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const TABLE_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
const FOOTER_Y_MM: f32 = 287.0;
/// Lowest baseline used for table rows before breaking to a new page.
const CONTENT_BOTTOM_MM: f32 = 278.0;
const CELL_PADDING_MM: f32 = 1.5;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// Title and file name of the generated document.
pub const PDF_TITLE: &str = "ADEX Validation Report";
pub const PDF_FILE_NAME: &str = "gf_adex_validation.pdf";

/// Header facts printed on the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub hostname: String,
    pub platform_version: String,
    pub revision: String,
    pub package_version: String,
    pub app_version: String,
    pub generated_on: String,
    pub country: String,
    pub implementer_types: Vec<String>,
}

impl ReportMetadata {
    /// Collect the header facts from the snapshots of a run.
    ///
    /// Implementer types are listed over every fetched indicator, configured
    /// or not, by display name where the allow-list knows them.
    pub fn from_snapshots(
        snapshots: &Snapshots,
        options: &ValidationOptions,
        generated_on: DateTime<Local>,
    ) -> Self {
        let info = snapshots.system_info.as_ref();
        let text = |value: Option<&str>| value.unwrap_or(UNKNOWN).to_string();
        Self {
            hostname: text(info.and_then(|i| i.context_path.as_deref())),
            platform_version: text(info.and_then(|i| i.version.as_deref())),
            revision: text(info.and_then(|i| i.revision.as_deref())),
            package_version: text(
                snapshots
                    .reference_package
                    .as_ref()
                    .and_then(|package| package.version()),
            ),
            app_version: text(snapshots.local_app_version.as_deref()),
            generated_on: generated_on.format("%Y-%m-%d %H:%M:%S").to_string(),
            country: text(snapshots.root_org_unit.as_ref().map(|ou| ou.name.as_str())),
            implementer_types: distinct_implementer_types(snapshots.indicators(), options)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn lines(&self) -> [String; 9] {
        [
            PDF_TITLE.to_string(),
            format!("Hostname: {}", self.hostname),
            format!("DHIS2 Version: {}", self.platform_version),
            format!("Revision: {}", self.revision),
            format!("Package version: {}", self.package_version),
            format!("App version: {}", self.app_version),
            format!("Generated on: {}", self.generated_on),
            format!("Country: {}", self.country),
            format!("Implementer types: {}", self.implementer_types.join(", ")),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// One positioned run of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    /// Baseline, measured from the top edge of the page.
    pub y_mm: f32,
    pub size: f32,
    pub style: FontStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfPage {
    pub lines: Vec<TextLine>,
}

impl PdfPage {
    fn push(&mut self, text: impl Into<String>, x_mm: f32, y_mm: f32, size: f32, style: FontStyle) {
        self.lines.push(TextLine {
            text: text.into(),
            x_mm,
            y_mm,
            size,
            style,
        });
    }

    /// Whether any line on the page contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfLayout {
    pub pages: Vec<PdfPage>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay out the metadata page, one section per rule with findings, and the
/// page footers.
pub fn build_layout(metadata: &ReportMetadata, report: &ValidationReport) -> PdfLayout {
    let mut pages = vec![metadata_page(metadata)];
    let mut any_findings = false;
    for result in report.with_findings() {
        any_findings = true;
        pages.extend(rule_section(result));
    }
    if !any_findings {
        let mut page = PdfPage::default();
        page.push("No issues found", MARGIN_MM, 20.0, TITLE_SIZE, FontStyle::Bold);
        pages.push(page);
    }

    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        let footer = format!("Page {} of {}", index + 1, total);
        let x = (PAGE_WIDTH_MM - text_width_mm(&footer, FOOTER_SIZE)) / 2.0;
        page.push(footer, x, FOOTER_Y_MM, FOOTER_SIZE, FontStyle::Italic);
    }
    PdfLayout { pages }
}

/// Metadata lines 10 mm apart; a line too wide for the page wraps onto
/// tighter continuation lines.
fn metadata_page(metadata: &ReportMetadata) -> PdfPage {
    let mut page = PdfPage::default();
    let mut y = 20.0;
    for line in metadata.lines() {
        let wrapped = wrap_text(&line, BODY_SIZE, META_WIDTH_MM);
        let continuation = wrapped.len() - 1;
        for (index, part) in wrapped.into_iter().enumerate() {
            let line_y = y + index as f32 * line_height_mm(BODY_SIZE);
            page.push(part, META_X_MM, line_y, BODY_SIZE, FontStyle::Regular);
        }
        y += META_LINE_SPACING_MM + continuation as f32 * line_height_mm(BODY_SIZE);
    }
    page
}

/// Pages for one rule: heading, instruction and the findings table.
///
/// The table header is repeated on every continuation page.
fn rule_section(result: &RuleResult) -> Vec<PdfPage> {
    let mut pages = Vec::new();
    let mut page = PdfPage::default();
    let mut y = 20.0;

    for line in wrap_text(&format!("Issue: {}", result.title()), TITLE_SIZE, CONTENT_WIDTH_MM) {
        page.push(line, MARGIN_MM, y, TITLE_SIZE, FontStyle::Bold);
        y += line_height_mm(TITLE_SIZE);
    }
    y += 2.0;
    for line in wrap_text(result.instruction(), BODY_SIZE, CONTENT_WIDTH_MM) {
        page.push(line, MARGIN_MM, y, BODY_SIZE, FontStyle::Regular);
        y += line_height_mm(BODY_SIZE);
    }
    y += 4.0;

    let headers: Vec<String> = result.headers().iter().map(|h| (*h).to_string()).collect();
    let column_width = CONTENT_WIDTH_MM / headers.len().max(1) as f32;
    y = table_row(&mut page, &headers, y, column_width, FontStyle::Bold);

    for finding in &result.findings {
        let cells = finding.texts();
        if y + row_height_mm(&cells, column_width) > CONTENT_BOTTOM_MM {
            pages.push(std::mem::take(&mut page));
            y = table_row(&mut page, &headers, 20.0, column_width, FontStyle::Bold);
        }
        y = table_row(&mut page, &cells, y, column_width, FontStyle::Regular);
    }
    pages.push(page);
    pages
}

/// Place one table row starting at `top`; returns the top of the next row.
fn table_row(page: &mut PdfPage, cells: &[String], top: f32, column_width: f32, style: FontStyle) -> f32 {
    let line_height = line_height_mm(TABLE_SIZE);
    let mut tallest = 1;
    for (column, cell) in cells.iter().enumerate() {
        let x = MARGIN_MM + column as f32 * column_width + CELL_PADDING_MM;
        let lines = wrap_text(cell, TABLE_SIZE, column_width - 2.0 * CELL_PADDING_MM);
        tallest = tallest.max(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            page.push(line, x, top + line_height * (index + 1) as f32, TABLE_SIZE, style);
        }
    }
    top + line_height * tallest as f32 + CELL_PADDING_MM
}

fn row_height_mm(cells: &[String], column_width: f32) -> f32 {
    let tallest = cells
        .iter()
        .map(|cell| wrap_text(cell, TABLE_SIZE, column_width - 2.0 * CELL_PADDING_MM).len())
        .max()
        .unwrap_or(1);
    line_height_mm(TABLE_SIZE) * tallest as f32 + CELL_PADDING_MM
}

fn line_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * 1.3
}

fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVERAGE_GLYPH_WIDTH
}

/// Greedy word wrap against an estimated glyph width.
///
/// Words longer than a whole line are hard-split. Always returns at least one
/// line so empty cells still occupy a row.
pub fn wrap_text(text: &str, size: f32, max_width_mm: f32) -> Vec<String> {
    let max_chars = ((max_width_mm / (size * PT_TO_MM * AVERAGE_GLYPH_WIDTH)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

/// Render a layout to PDF bytes.
pub fn render_pdf(layout: &PdfLayout) -> Result<Vec<u8>> {
    let _span = info_span!("render", format = "pdf").entered();
    let (doc, first_page, first_layer) =
        PdfDocument::new(PDF_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                line.size,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                fonts.get(line.style),
            );
        }
    }
    Ok(doc.save_to_bytes()?)
}

/// Lay out and write the PDF report to `path`.
pub fn write_pdf(path: &Path, metadata: &ReportMetadata, report: &ValidationReport) -> Result<()> {
    let layout = build_layout(metadata, report);
    let bytes = render_pdf(&layout)?;
    std::fs::write(path, bytes).map_err(|err| ReportError::io(path, err))?;
    info!(path = %path.display(), pages = layout.page_count(), "Wrote PDF report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let text = "Remove the public sharing from the exchange and share it with named users";
        for line in wrap_text(text, 12.0, 40.0) {
            assert!(text_width_mm(&line, 12.0) <= 40.0, "{line}");
        }
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text(&"x".repeat(100), 12.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 100);
    }

    #[test]
    fn test_wrap_empty_text_is_one_line() {
        assert_eq!(wrap_text("", 9.0, 50.0), vec![String::new()]);
    }
}
