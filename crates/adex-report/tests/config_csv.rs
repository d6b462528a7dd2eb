//! Tests for the indicator configuration CSV.

mod common;

use adex_report::{CsvQuoting, annotate, csv_rows, render_csv, write_csv};

fn annotated() -> Vec<adex_model::Indicator> {
    let snapshots = common::snapshots();
    annotate(
        snapshots.indicators(),
        snapshots.operands.as_deref().unwrap_or_default(),
        &[],
        &[],
    )
}

#[test]
fn one_row_per_exchange_request_indicator() {
    let rows = csv_rows(&common::snapshots(), &annotated());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][2], "Monthly request");
    assert_eq!(rows[1][3], "UNKNOWN");
    assert_eq!(rows[2][6], "MIXED");
}

#[test]
fn legacy_quoting_wraps_every_field() {
    let text = render_csv(&common::snapshots(), &annotated(), CsvQuoting::Legacy)
        .expect("render csv");
    assert!(!text.ends_with('\n'));
    insta::assert_snapshot!(text, @r##"
    "ex_uid","exchange_name","request_name","Code","Short Name","Indicator name","Period type","Numerator"
    "EX1","GF monthly","Monthly request","GFADEX_IND_A","Malaria cases","GFADEX Malaria cases","MONTHLY","#{Confirmed, <5}"
    "EX1","GF monthly","Monthly request","UNKNOWN","UNKNOWN","UNKNOWN","MONTHLY","UNKNOWN"
    "EX1","GF monthly","Mixed request","GFADEX_IND_B","TB "notified"","GFADEX TB "notified"","MIXED","0"
    "##);
}

#[test]
fn rfc4180_quoting_escapes_embedded_quotes() {
    let text = render_csv(&common::snapshots(), &annotated(), CsvQuoting::Rfc4180)
        .expect("render csv");
    assert!(text.ends_with('\n'));
    insta::assert_snapshot!(text.trim_end(), @r##"
    ex_uid,exchange_name,request_name,Code,Short Name,Indicator name,Period type,Numerator
    EX1,GF monthly,Monthly request,GFADEX_IND_A,Malaria cases,GFADEX Malaria cases,MONTHLY,"#{Confirmed, <5}"
    EX1,GF monthly,Monthly request,UNKNOWN,UNKNOWN,UNKNOWN,MONTHLY,UNKNOWN
    EX1,GF monthly,Mixed request,GFADEX_IND_B,"TB ""notified""","GFADEX TB ""notified""",MIXED,0
    "##);
}

#[test]
fn raw_numerators_when_not_annotated() {
    let snapshots = common::snapshots();
    let rows = csv_rows(&snapshots, snapshots.indicators());
    assert_eq!(rows[0][7], "#{deA.coc1}");
}

#[test]
fn no_exchanges_gives_header_only() {
    let mut snapshots = common::snapshots();
    snapshots.exchanges = None;
    let text = render_csv(&snapshots, &[], CsvQuoting::Legacy).expect("render csv");
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn write_csv_creates_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(adex_report::CSV_FILE_NAME);
    write_csv(&path, &common::snapshots(), &annotated(), CsvQuoting::Legacy).expect("write csv");
    let text = std::fs::read_to_string(&path).expect("read csv");
    assert!(text.starts_with("\"ex_uid\""));
}

#[test]
fn write_csv_reports_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("out.csv");
    let err = write_csv(&path, &common::snapshots(), &annotated(), CsvQuoting::Legacy)
        .expect_err("directory does not exist");
    assert!(matches!(err, adex_report::ReportError::Io { .. }));
}
