//! Indicator configuration checks.

use std::collections::BTreeSet;

use adex_model::{Indicator, UNKNOWN};
use tracing::warn;

use crate::catalog::{Cell, Finding};
use crate::context::RuleContext;
use crate::finding;
use crate::options::ValidationOptions;
use crate::tables::AGE_BAND_RULES;

pub fn indicators_exist(ctx: &RuleContext<'_>) -> Vec<Finding> {
    if ctx.indicators().is_empty() {
        vec![finding!["No GF ADEX indicators found"]]
    } else {
        Vec::new()
    }
}

/// Configured indicators that no request references.
pub fn configured_but_ignored(ctx: &RuleContext<'_>) -> Vec<Finding> {
    ctx.partition
        .configured_in_order()
        .filter(|indicator| !ctx.is_requested(&indicator.id))
        .map(|indicator| finding![&indicator.name, &indicator.id])
        .collect()
}

pub fn denominator_changed(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for indicator in ctx.indicators() {
        match indicator.denominator.as_deref() {
            Some(denominator) if denominator.trim() == "1" => {}
            Some(denominator) => {
                findings.push(finding![&indicator.name, &indicator.id, denominator]);
            }
            None => findings.push(finding![&indicator.name, &indicator.id, UNKNOWN]),
        }
    }
    findings
}

pub fn decimals_changed(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for indicator in ctx.indicators() {
        let decimals = match indicator.decimals {
            Some(0) => continue,
            Some(decimals) => Cell::Number(decimals),
            None => Cell::from(UNKNOWN),
        };
        findings.push(finding![&indicator.name, &indicator.id, decimals]);
    }
    findings
}

/// Indicators whose implementer type is not in the allow-list.
///
/// Skipped when no allow-list is configured.
pub fn implementer_type(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let allowed = &ctx.options.implementer_types;
    if allowed.is_empty() {
        warn!("No implementer types configured, skipping implementer type check");
        return Vec::new();
    }

    ctx.indicators()
        .iter()
        .filter(|indicator| {
            !indicator
                .aggregate_export_attribute_option_combo
                .as_deref()
                .is_some_and(|id| allowed.contains(id))
        })
        .map(|indicator| {
            finding![
                &indicator.name,
                &indicator.id,
                indicator
                    .aggregate_export_attribute_option_combo
                    .as_deref()
                    .unwrap_or(UNKNOWN),
            ]
        })
        .collect()
}

/// Requested indicators that the reference package does not define.
///
/// Rows come from the fetched indicators so that names are available.
pub fn unknown_in_requests(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let known: BTreeSet<&str> = ctx.package.indicator_ids().collect();
    let unknown: BTreeSet<&str> = ctx
        .requests()
        .flat_map(|r| r.request.dx.iter().map(String::as_str))
        .filter(|id| !known.contains(id))
        .collect();

    ctx.indicators()
        .iter()
        .filter(|indicator| unknown.contains(indicator.id.as_str()))
        .map(|indicator| finding![&indicator.id, &indicator.name])
        .collect()
}

/// Requested indicators that submit both fine and coarse age bands of one data element.
///
/// Every indicator on either side is listed once by name.
pub fn mutually_exclusive_age_bands(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let requested: Vec<&Indicator> = ctx
        .partition
        .configured_in_order()
        .filter(|indicator| ctx.is_requested(&indicator.id))
        .collect();

    let mut names: Vec<&str> = Vec::new();
    for rule in AGE_BAND_RULES {
        let matches: Vec<&Indicator> = requested
            .iter()
            .copied()
            .filter(|indicator| indicator.code_or_empty().contains(rule.data_element))
            .collect();
        let has_option = |indicator: &Indicator, options: &[&str]| {
            options
                .iter()
                .any(|option| indicator.code_or_empty().contains(*option))
        };
        let left: Vec<&Indicator> = matches
            .iter()
            .copied()
            .filter(|indicator| has_option(*indicator, rule.left_side))
            .collect();
        let right: Vec<&Indicator> = matches
            .iter()
            .copied()
            .filter(|indicator| has_option(*indicator, rule.right_side))
            .collect();
        if left.is_empty() || right.is_empty() {
            continue;
        }
        for indicator in left.into_iter().chain(right) {
            if !names.contains(&indicator.name.as_str()) {
                names.push(&indicator.name);
            }
        }
    }

    names.into_iter().map(|name| finding![name]).collect()
}

/// Implementer types in use by configured indicators, with counts, when more than one is used.
pub fn single_implementer_type(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for indicator in ctx.partition.configured_in_order() {
        let name = implementer_type_name(indicator, ctx.options);
        match counts.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    if counts.len() <= 1 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(name, count)| finding![name, count])
        .collect()
}

fn implementer_type_name<'a>(indicator: &'a Indicator, options: &'a ValidationOptions) -> &'a str {
    indicator
        .aggregate_export_attribute_option_combo
        .as_deref()
        .map_or(UNKNOWN, |id| options.implementer_types.display_name(id))
}

/// Distinct implementer type names of the given indicators, in first-seen order.
pub fn distinct_implementer_types<'a>(
    indicators: impl IntoIterator<Item = &'a Indicator>,
    options: &'a ValidationOptions,
) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for indicator in indicators {
        let name = implementer_type_name(indicator, options);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
