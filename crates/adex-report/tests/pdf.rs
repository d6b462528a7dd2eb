//! Tests for the PDF report layout and rendering.

mod common;

use adex_report::{FontStyle, ReportMetadata, build_layout, render_pdf, wrap_text, write_pdf};
use adex_validate::{RuleKey, ValidationOptions, ValidationReport, finding};
use chrono::{Local, TimeZone};

fn metadata() -> ReportMetadata {
    let generated_on = Local
        .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("unambiguous local time");
    ReportMetadata::from_snapshots(&common::snapshots(), &ValidationOptions::default(), generated_on)
}

#[test]
fn metadata_collected_from_snapshots() {
    let metadata = metadata();
    assert_eq!(metadata.hostname, "https://dhis2.example.org");
    assert_eq!(metadata.platform_version, "2.40.3");
    assert_eq!(metadata.package_version, "UNKNOWN");
    assert_eq!(metadata.app_version, "1.4.0");
    assert_eq!(metadata.generated_on, "2026-03-01 09:30:00");
    assert_eq!(metadata.country, "Kenya");
    assert_eq!(metadata.implementer_types, vec!["IT_GOV", "IT_NGO"]);
}

#[test]
fn clean_report_has_no_issues_page() {
    let layout = build_layout(&metadata(), &ValidationReport::empty());
    assert_eq!(layout.page_count(), 2);
    assert!(layout.pages[0].contains("ADEX Validation Report"));
    assert!(layout.pages[0].contains("Implementer types: IT_GOV, IT_NGO"));
    assert!(layout.pages[1].contains("No issues found"));
    assert!(layout.pages[1].contains("Page 2 of 2"));
}

#[test]
fn long_implementer_list_wraps_within_margins() {
    let mut metadata = metadata();
    metadata.implementer_types = (1..=30).map(|i| format!("Implementer type {i}")).collect();
    let layout = build_layout(&metadata, &ValidationReport::empty());
    let page = &layout.pages[0];

    let full = format!("Implementer types: {}", metadata.implementer_types.join(", "));
    let expected = wrap_text(&full, 12.0, 210.0 - 20.0 - 15.0);
    assert!(expected.len() > 1);
    for part in &expected {
        assert!(page.lines.iter().any(|line| line.text == *part));
    }
    assert!(!page.lines.iter().any(|line| line.text == full));

    let country = page.lines.iter().find(|line| line.text.starts_with("Country:")).expect("country line");
    let types = page
        .lines
        .iter()
        .find(|line| line.text.starts_with("Implementer types:"))
        .expect("implementer line");
    assert!(types.y_mm > country.y_mm);
}

#[test]
fn one_section_per_rule_in_catalog_order() {
    let report = common::report_with(vec![
        (RuleKey::ExBasicAuth, vec![finding!("GF monthly", "admin")]),
        (RuleKey::ReqIndDuplicated, vec![finding!("Monthly request", "IND_A")]),
    ]);
    let layout = build_layout(&metadata(), &report);
    assert_eq!(layout.page_count(), 3);
    assert!(layout.pages[1].contains("Issue: Requests with duplicate indicators"));
    assert!(layout.pages[2].contains("admin"));
    assert!(!layout.pages.iter().any(|page| page.contains("No issues found")));
}

#[test]
fn every_page_has_a_footer() {
    let report = common::report_with(vec![(RuleKey::ExExist, vec![finding!("No exchanges found")])]);
    let layout = build_layout(&metadata(), &report);
    let total = layout.page_count();
    for (index, page) in layout.pages.iter().enumerate() {
        let footer = page.lines.last().expect("footer line");
        assert_eq!(footer.text, format!("Page {} of {}", index + 1, total));
        assert_eq!(footer.style, FontStyle::Italic);
        assert!(footer.size < 9.0);
    }
}

#[test]
fn long_tables_continue_with_repeated_header() {
    let rows = (0..120)
        .map(|i| finding!(format!("Request {i}"), format!("IND_{i}")))
        .collect();
    let report = common::report_with(vec![(RuleKey::ReqIndNongf, rows)]);
    let layout = build_layout(&metadata(), &report);
    assert!(layout.page_count() > 3);

    let section = &layout.pages[1..];
    for page in section {
        assert!(page.contains("Indicator ID"));
        for line in &page.lines {
            assert!(line.y_mm <= 287.0);
        }
    }
    assert!(section.last().expect("last page").contains("Request 119"));
}

#[test]
fn rendered_bytes_are_a_pdf() {
    let report = common::report_with(vec![(RuleKey::IndsExist, vec![finding!("No GF ADEX indicators found")])]);
    let bytes = render_pdf(&build_layout(&metadata(), &report)).expect("render pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn write_pdf_creates_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(adex_report::PDF_FILE_NAME);
    write_pdf(&path, &metadata(), &ValidationReport::empty()).expect("write pdf");
    assert!(std::fs::metadata(&path).expect("pdf exists").len() > 0);
}
