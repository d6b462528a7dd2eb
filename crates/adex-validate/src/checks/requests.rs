//! Checks over individual exchange requests.

use std::collections::BTreeSet;

use adex_model::UNKNOWN;

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;

/// Numerator previews are cut to this many characters.
const NUMERATOR_PREVIEW_CHARS: usize = 50;

/// Requests listing the same indicator more than once.
///
/// Each repeated value is reported once, in the order it first repeats.
pub fn duplicated_indicators(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for r in ctx.requests() {
        let mut seen = BTreeSet::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for id in &r.request.dx {
            if !seen.insert(id.as_str()) && !duplicates.contains(&id.as_str()) {
                duplicates.push(id.as_str());
            }
        }
        if !duplicates.is_empty() {
            findings.push(finding![&r.request.name, duplicates.join(", ")]);
        }
    }
    findings
}

/// Requests using indicators whose numerator is still the "0" sentinel.
pub fn unconfigured_indicators(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for r in ctx.requests() {
        for id in &r.request.dx {
            if let Some(indicator) = ctx.partition.unconfigured.get(id.as_str()) {
                findings.push(finding![
                    &r.request.name,
                    &indicator.name,
                    id,
                    numerator_preview(&indicator.numerator),
                ]);
            }
        }
    }
    findings
}

/// The literal "0" is shown as is; anything else is cut and marked with an ellipsis.
pub fn numerator_preview(numerator: &str) -> String {
    if numerator == "0" {
        return numerator.to_string();
    }
    let head: String = numerator.chars().take(NUMERATOR_PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Request entries that are not program indicators at all.
pub fn foreign_indicators(ctx: &RuleContext<'_>) -> Vec<Finding> {
    ctx.requests()
        .flat_map(|r| {
            r.request
                .dx
                .iter()
                .filter(move |id| !ctx.partition.contains(id))
                .map(move |id| finding![&r.request.name, id])
        })
        .collect()
}

/// Requests whose output id scheme differs from the required attribute scheme.
///
/// The vendor prefix is compared case-insensitively (`attribute:` equals `ATTRIBUTE:`).
pub fn output_id_scheme(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for r in ctx.requests() {
        match r.request.output_id_scheme.as_deref() {
            Some(scheme) if normalize_scheme(scheme) == ctx.options.output_id_scheme => {}
            Some(scheme) => findings.push(finding![&r.request.name, scheme]),
            None => findings.push(finding![&r.request.name, UNKNOWN]),
        }
    }
    findings
}

fn normalize_scheme(scheme: &str) -> String {
    scheme.replacen("attribute:", "ATTRIBUTE:", 1)
}

/// Requests not aggregated to exactly the root organisation unit.
///
/// Without a root unit every request is reported.
pub fn root_org_unit(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let root_id = ctx.snapshots.root_org_unit.as_ref().map(|ou| ou.id.as_str());
    ctx.requests()
        .filter(|r| match root_id {
            Some(root) => r.request.ou != [root],
            None => true,
        })
        .map(|r| finding![&r.request.name, r.request.ou.join(",")])
        .collect()
}
