//! Fixture builders for a compliant deployment that individual tests break on purpose.

#![allow(dead_code)]

use adex_model::{
    AccessEntry, AttributeRef, AttributeValue, DataExchange, Indicator, MetadataPackage,
    OrganisationUnit, PackageIndicator, PackageInfo, Request, Sharing, Snapshots,
};

pub const ROOT_ID: &str = "OU_ROOT";

pub fn indicator(id: &str, name: &str, numerator: &str) -> Indicator {
    Indicator {
        id: id.to_string(),
        name: name.to_string(),
        short_name: Some(name.to_string()),
        code: Some(format!("GFADEX_{id}")),
        numerator: numerator.to_string(),
        denominator: Some("1".to_string()),
        decimals: Some(0),
        ..Indicator::default()
    }
}

pub fn configured(id: &str) -> Indicator {
    indicator(id, &format!("GFADEX {id}"), &format!("#{{de_{id}.coc}}"))
}

pub fn request(name: &str, dx: &[&str], pe: &[&str]) -> Request {
    Request {
        name: name.to_string(),
        dx: dx.iter().map(ToString::to_string).collect(),
        pe: pe.iter().map(ToString::to_string).collect(),
        ou: vec![ROOT_ID.to_string()],
        output_id_scheme: Some("attribute:nHzX73VyNun".to_string()),
    }
}

pub fn exchange(name: &str, requests: Vec<Request>) -> DataExchange {
    let mut exchange = DataExchange {
        id: format!("EX_{name}"),
        name: name.to_string(),
        sharing: Some(Sharing {
            public: Some("--------".to_string()),
            ..Sharing::default()
        }),
        user_group_accesses: Some(vec![AccessEntry {
            id: Some("UG1".to_string()),
            access: Some("r-rw----".to_string()),
            display_name: Some("GF ADEx submitters".to_string()),
        }]),
        ..DataExchange::default()
    };
    exchange.target.api.url = Some("https://adex.theglobalfund.org/".to_string());
    exchange.target.api.access_token = Some("d2p_token".to_string());
    exchange.target.request.org_unit_id_scheme = Some("CODE".to_string());
    exchange.target.request.id_scheme = Some("UID".to_string());
    exchange.source.requests = requests;
    exchange
}

pub fn package(indicator_ids: &[&str]) -> MetadataPackage {
    MetadataPackage {
        package: Some(vec![PackageInfo {
            version: Some("1.2.0".to_string()),
            origin: Some("https://adex.theglobalfund.org".to_string()),
        }]),
        attributes: Some(vec![]),
        indicators: Some(
            indicator_ids
                .iter()
                .map(|id| PackageIndicator {
                    id: (*id).to_string(),
                    name: format!("GFADEX {id}"),
                })
                .collect(),
        ),
        user_groups: Some(vec![]),
        indicator_types: Some(vec![]),
        indicator_groups: Some(vec![]),
    }
}

pub fn root_org_unit() -> OrganisationUnit {
    OrganisationUnit {
        id: ROOT_ID.to_string(),
        name: "Kenya".to_string(),
        code: Some("KEN".to_string()),
        attribute_values: vec![AttributeValue {
            attribute: AttributeRef {
                id: "hpe7LiGDgvo".to_string(),
            },
            value: Some("KEN".to_string()),
        }],
    }
}

/// Snapshots with every indicator known to the reference package.
pub fn snapshots(indicators: Vec<Indicator>, exchanges: Vec<DataExchange>) -> Snapshots {
    let ids: Vec<&str> = indicators.iter().map(|indicator| indicator.id.as_str()).collect();
    let reference_package = package(&ids);
    Snapshots {
        indicators: adex_model::non_empty(indicators),
        exchanges: adex_model::non_empty(exchanges),
        root_org_unit: Some(root_org_unit()),
        reference_package: Some(reference_package),
        ..Snapshots::default()
    }
}

/// A single compliant exchange with one monthly request using `A` and `B`.
pub fn compliant() -> Snapshots {
    snapshots(
        vec![configured("A"), configured("B")],
        vec![exchange(
            "GF monthly",
            vec![request("Monthly request", &["A", "B"], &["LAST_12_MONTHS"])],
        )],
    )
}
