//! Reference metadata package checks.

use std::sync::LazyLock;

use adex_model::UNKNOWN;
use regex::Regex;

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;

/// Package versions are plain `MAJOR.MINOR.PATCH`.
static PACKAGE_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("Invalid package version regex"));

/// The single finding reported when the package lacks required keys.
pub fn missing_keys(keys: &[&str]) -> Finding {
    finding![format!(
        "The metadata package is missing the following keys: {}",
        keys.join(", ")
    )]
}

/// Content checks on a package carrying every required key.
pub fn package_contents(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let info = ctx.package.info();

    let version = info.and_then(|info| info.version.as_deref());
    if !version.is_some_and(|v| PACKAGE_VERSION_REGEX.is_match(v)) {
        findings.push(finding![format!(
            "The GFADEX metadata package versions is not valid: {}",
            version.unwrap_or(UNKNOWN)
        )]);
    }

    let origin = info.and_then(|info| info.origin.as_deref());
    if !origin.is_some_and(|o| o.ends_with(&ctx.options.package_origin_suffix)) {
        findings.push(finding![format!(
            "The GFADEX metadata package origin is not valid: {}",
            origin.unwrap_or(UNKNOWN)
        )]);
    }

    let indicators = ctx.package.indicators.as_deref().unwrap_or_default();
    if indicators.is_empty() {
        findings.push(finding![
            "The GFADEX metadata package does not contain any indicators"
        ]);
    } else {
        let marker = ctx.options.package_indicator_marker.as_str();
        let unmarked: Vec<&str> = indicators
            .iter()
            .filter(|indicator| !indicator.name.contains(marker))
            .map(|indicator| indicator.name.as_str())
            .collect();
        if !unmarked.is_empty() {
            findings.push(finding![format!(
                "The GFADEX metadata package contains indicators without {marker} in the name: {}",
                unmarked.join(", ")
            )]);
        }
    }

    findings
}
