//! Exchange sharing and target checks.

use adex_model::{DataExchange, UNKNOWN};

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;

pub fn exchanges_exist(ctx: &RuleContext<'_>) -> Vec<Finding> {
    if ctx.exchanges().is_empty() {
        vec![finding!["No exchanges found"]]
    } else {
        Vec::new()
    }
}

pub fn public_sharing(ctx: &RuleContext<'_>) -> Vec<Finding> {
    exchanges_where(ctx, DataExchange::is_publicly_shared)
}

pub fn user_group_sharing(ctx: &RuleContext<'_>) -> Vec<Finding> {
    exchanges_where(ctx, |exchange| !exchange.has_user_group_access())
}

fn exchanges_where(ctx: &RuleContext<'_>, predicate: impl Fn(&DataExchange) -> bool) -> Vec<Finding> {
    ctx.exchanges()
        .iter()
        .filter(|exchange| predicate(*exchange))
        .map(|exchange| finding![&exchange.name])
        .collect()
}

pub fn target_api(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for exchange in ctx.exchanges() {
        match exchange.target.api.url.as_deref() {
            Some(url) if ctx.options.is_target_api(url) => {}
            Some(url) => findings.push(finding![&exchange.name, url]),
            None => findings.push(finding![&exchange.name, UNKNOWN]),
        }
    }
    findings
}

/// Exchanges carrying a basic-auth username, even an empty one.
pub fn basic_auth(ctx: &RuleContext<'_>) -> Vec<Finding> {
    ctx.exchanges()
        .iter()
        .filter_map(|exchange| {
            exchange
                .target
                .api
                .username
                .as_deref()
                .map(|username| finding![&exchange.name, username])
        })
        .collect()
}

pub fn target_org_unit_scheme(ctx: &RuleContext<'_>) -> Vec<Finding> {
    scheme_mismatches(ctx, &ctx.options.target_org_unit_id_scheme, |exchange| {
        exchange.target.request.org_unit_id_scheme.as_deref()
    })
}

pub fn target_id_scheme(ctx: &RuleContext<'_>) -> Vec<Finding> {
    scheme_mismatches(ctx, &ctx.options.target_id_scheme, |exchange| {
        exchange.target.request.id_scheme.as_deref()
    })
}

fn scheme_mismatches(
    ctx: &RuleContext<'_>,
    required: &str,
    scheme: impl Fn(&DataExchange) -> Option<&str>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for exchange in ctx.exchanges() {
        match scheme(exchange) {
            Some(actual) if actual == required => {}
            Some(actual) => findings.push(finding![&exchange.name, actual]),
            None => findings.push(finding![&exchange.name, UNKNOWN]),
        }
    }
    findings
}
