//! Integration tests for the fetch, validate and export pipeline.

use std::fs;
use std::path::Path;

use adex_cli::config::{load_config, load_config_from, load_config_or_default};
use adex_cli::pipeline::{
    EXIT_CLEAN, EXIT_ERROR, EXIT_FATAL, EXIT_FINDINGS, Exports, SourceSelection, error_message,
    exit_code_for_error, resolve_export_path, run_audit, write_exports,
};
use adex_fetch::{DEFAULT_APP_KEY, DirectorySource, FetchError, Resource};
use adex_report::CsvQuoting;
use adex_validate::{PeriodConflictMode, RuleKey, ValidationOptions, VersionPolicy};
use serde_json::{Value, json};

fn write(dir: &Path, resource: Resource, value: &Value) {
    fs::write(dir.join(resource.file_name()), value.to_string()).expect("write snapshot file");
}

fn indicator(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("GFADEX {id}"),
        "shortName": format!("GFADEX {id}"),
        "code": format!("GFADEX_{id}"),
        "numerator": format!("#{{de_{id}.coc}}"),
        "denominator": "1",
        "decimals": 0
    })
}

/// A compliant offline export with two indicators in one monthly request.
fn compliant_export(dir: &Path) {
    write(dir, Resource::Indicators, &json!({"indicators": [indicator("A"), indicator("B")]}));
    write(
        dir,
        Resource::Exchanges,
        &json!({"aggregateDataExchanges": [{
            "id": "EX_1",
            "name": "GF monthly",
            "sharing": {"public": "--------"},
            "userGroupAccesses": [{"id": "UG1", "access": "r-rw----"}],
            "target": {
                "api": {"url": "https://adex.theglobalfund.org/", "accessToken": "d2p_token"},
                "request": {"orgUnitIdScheme": "CODE", "idScheme": "UID"}
            },
            "source": {"requests": [{
                "name": "Monthly request",
                "dx": ["A", "B"],
                "pe": ["LAST_12_MONTHS"],
                "ou": ["OU_ROOT"],
                "outputIdScheme": "attribute:nHzX73VyNun"
            }]}
        }]}),
    );
    write(
        dir,
        Resource::OrganisationUnits,
        &json!({"organisationUnits": [{
            "id": "OU_ROOT",
            "name": "Kenya",
            "code": "KEN",
            "attributeValues": [{"attribute": {"id": "hpe7LiGDgvo"}, "value": "KEN"}]
        }]}),
    );
    write(
        dir,
        Resource::ReferencePackage,
        &json!({
            "package": [{"version": "1.2.0", "origin": "https://adex.theglobalfund.org"}],
            "attributes": [],
            "indicators": [{"id": "A", "name": "GFADEX A"}, {"id": "B", "name": "GFADEX B"}],
            "userGroups": [],
            "indicatorTypes": [],
            "indicatorGroups": []
        }),
    );
}

#[test]
fn compliant_export_exits_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    compliant_export(dir.path());
    let outcome = run_audit(
        &DirectorySource::new(dir.path()),
        &ValidationOptions::default(),
        DEFAULT_APP_KEY,
    )
    .expect("audit");
    assert!(!outcome.report.has_findings());
    assert_eq!(outcome.exit_code(), EXIT_CLEAN);
}

#[test]
fn findings_exit_with_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    compliant_export(dir.path());
    fs::remove_file(dir.path().join(Resource::Exchanges.file_name())).expect("remove exchanges");
    let outcome = run_audit(
        &DirectorySource::new(dir.path()),
        &ValidationOptions::default(),
        DEFAULT_APP_KEY,
    )
    .expect("audit");
    assert_eq!(outcome.report.findings(RuleKey::ExExist).len(), 1);
    assert_eq!(outcome.exit_code(), EXIT_FINDINGS);
}

#[test]
fn missing_reference_package_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    compliant_export(dir.path());
    fs::remove_file(dir.path().join(Resource::ReferencePackage.file_name())).expect("remove package");
    let error = run_audit(
        &DirectorySource::new(dir.path()),
        &ValidationOptions::default(),
        DEFAULT_APP_KEY,
    )
    .expect_err("package is required");
    assert_eq!(exit_code_for_error(&error), EXIT_FATAL);
    assert!(error_message(&error).contains("import the GFADEX package"));
}

#[test]
fn other_errors_exit_with_three() {
    let error = SourceSelection::Directory("/nonexistent/adex/export".into())
        .open()
        .err()
        .expect("directory does not exist");
    assert_eq!(exit_code_for_error(&error), EXIT_ERROR);
}

#[test]
fn exports_written_into_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    compliant_export(dir.path());
    let options = ValidationOptions::default();
    let outcome = run_audit(&DirectorySource::new(dir.path()), &options, DEFAULT_APP_KEY).expect("audit");

    let out = tempfile::tempdir().expect("output dir");
    let exports = Exports {
        csv: Some(out.path().to_path_buf()),
        pdf: Some(out.path().to_path_buf()),
        json: Some(out.path().join("custom.json")),
        csv_quoting: CsvQuoting::Rfc4180,
    };
    let written = write_exports(&outcome, &options, &exports).expect("exports");

    assert_eq!(
        written,
        vec![
            out.path().join("gf_indicator_config.csv"),
            out.path().join("gf_adex_validation.pdf"),
            out.path().join("custom.json"),
        ]
    );
    let csv = fs::read_to_string(&written[0]).expect("read csv");
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("GFADEX_A"));
}

#[test]
fn export_failure_message_carries_hint() {
    let dir = tempfile::tempdir().expect("tempdir");
    compliant_export(dir.path());
    let options = ValidationOptions::default();
    let outcome = run_audit(&DirectorySource::new(dir.path()), &options, DEFAULT_APP_KEY).expect("audit");

    let exports = Exports {
        csv: Some(dir.path().join("missing").join("config.csv")),
        ..Exports::default()
    };
    let error = write_exports(&outcome, &options, &exports).expect_err("parent directory is missing");
    let message = error_message(&error);
    assert!(message.contains("config.csv"));
    assert!(message.contains("writable"));
    assert_eq!(exit_code_for_error(&error), EXIT_ERROR);
}

#[test]
fn rejected_token_message_names_the_token() {
    let error = anyhow::Error::new(FetchError::Status {
        endpoint: "system/info.json".to_string(),
        status: 401,
    })
    .context("connect to https://dhis2.example.org");
    let message = error_message(&error);
    assert!(message.starts_with("connect to https://dhis2.example.org"));
    assert!(message.ends_with("Check the API token."));
}

#[test]
fn export_path_resolution() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(resolve_export_path(dir.path(), "x.csv"), dir.path().join("x.csv"));
    let file = dir.path().join("report.csv");
    assert_eq!(resolve_export_path(&file, "x.csv"), file);
}

#[test]
fn config_file_sections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("adex-audit.toml");
    fs::write(
        &path,
        r#"
[source]
server = "https://dhis2.example.org"
token_env = "MY_TOKEN"
app_release_url = "https://releases.example.org/adex-flow/latest"

[validation]
version_policy = "report"
period_conflicts = "per_bucket_pair"

[export]
csv_quoting = "rfc4180"
"#,
    )
    .expect("write config");

    let config = load_config(Some(&path)).expect("load config");
    assert_eq!(config.source.server.as_deref(), Some("https://dhis2.example.org"));
    assert_eq!(config.source.token_env, "MY_TOKEN");
    assert_eq!(config.source.app_key, DEFAULT_APP_KEY);
    let releases = config.source.release_urls();
    assert!(releases.package.is_none());
    assert_eq!(releases.app.as_deref(), Some("https://releases.example.org/adex-flow/latest"));
    assert_eq!(config.validation.version_policy, VersionPolicy::Report);
    assert_eq!(config.validation.period_conflicts, PeriodConflictMode::PerBucketPair);
    assert_eq!(config.validation.target_id_scheme, "UID");
    assert_eq!(config.export.csv_quoting, CsvQuoting::Rfc4180);
}

#[test]
fn invalid_config_is_strict_only_when_explicit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("adex-audit.toml");
    fs::write(&path, "[validation\nversion_policy = ").expect("write config");

    assert!(load_config_from(&path).is_err());
    assert_eq!(load_config_or_default(&path), Default::default());
    assert_eq!(
        load_config_or_default(&dir.path().join("missing.toml")),
        Default::default()
    );
}
