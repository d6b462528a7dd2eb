//! Shared fixtures for renderer tests.

#![allow(dead_code)]

use adex_model::{
    DataElementOperand, DataExchange, Indicator, OrganisationUnit, Request, Snapshots, SystemInfo,
};
use adex_validate::{Finding, RuleKey, ValidationReport};

pub fn indicator(id: &str, short_name: &str, numerator: &str, implementer_type: &str) -> Indicator {
    Indicator {
        id: id.to_string(),
        name: format!("GFADEX {short_name}"),
        short_name: Some(short_name.to_string()),
        code: Some(format!("GFADEX_{id}")),
        numerator: numerator.to_string(),
        denominator: Some("1".to_string()),
        decimals: Some(0),
        aggregate_export_attribute_option_combo: Some(implementer_type.to_string()),
        ..Indicator::default()
    }
}

pub fn request(name: &str, dx: &[&str], pe: &[&str]) -> Request {
    Request {
        name: name.to_string(),
        dx: dx.iter().map(ToString::to_string).collect(),
        pe: pe.iter().map(ToString::to_string).collect(),
        ou: vec!["OU_ROOT".to_string()],
        output_id_scheme: Some("ATTRIBUTE:nHzX73VyNun".to_string()),
    }
}

/// Two indicators, one exchange with a monthly and a mixed request, and one
/// request entry that points at an indicator which does not exist.
pub fn snapshots() -> Snapshots {
    let mut exchange = DataExchange {
        id: "EX1".to_string(),
        name: "GF monthly".to_string(),
        ..DataExchange::default()
    };
    exchange.source.requests = vec![
        request("Monthly request", &["IND_A", "IND_GONE"], &["LAST_12_MONTHS"]),
        request("Mixed request", &["IND_B"], &["LAST_MONTH", "2024Q1"]),
    ];
    Snapshots {
        system_info: Some(SystemInfo {
            context_path: Some("https://dhis2.example.org".to_string()),
            version: Some("2.40.3".to_string()),
            revision: Some("abc123".to_string()),
        }),
        indicators: Some(vec![
            indicator("IND_A", "Malaria cases", "#{deA.coc1}", "IT_GOV"),
            indicator("IND_B", "TB \"notified\"", "0", "IT_NGO"),
        ]),
        exchanges: Some(vec![exchange]),
        root_org_unit: Some(OrganisationUnit {
            id: "OU_ROOT".to_string(),
            name: "Kenya".to_string(),
            code: Some("KEN".to_string()),
            attribute_values: Vec::new(),
        }),
        operands: Some(vec![DataElementOperand {
            id: Some("deA.coc1".to_string()),
            short_name: Some("Confirmed, <5".to_string()),
            dimension_item: "deA.coc1".to_string(),
        }]),
        local_app_version: Some("1.4.0".to_string()),
        ..Snapshots::default()
    }
}

/// An empty report with the given findings recorded.
pub fn report_with(entries: Vec<(RuleKey, Vec<Finding>)>) -> ValidationReport {
    let mut report = ValidationReport::empty();
    for (key, findings) in entries {
        if let Some(result) = report.results.iter_mut().find(|result| result.key == key) {
            result.findings.extend(findings);
        }
    }
    report
}
