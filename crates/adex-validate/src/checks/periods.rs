//! Period consistency checks.

use adex_model::UNKNOWN;

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;
use crate::options::PeriodConflictMode;
use crate::period::{PeriodType, Periodicity, is_relative};

pub fn mixed_periods(ctx: &RuleContext<'_>) -> Vec<Finding> {
    requests_of_type(ctx, PeriodType::Mixed)
}

pub fn unknown_periods(ctx: &RuleContext<'_>) -> Vec<Finding> {
    requests_of_type(ctx, PeriodType::Unknown)
}

fn requests_of_type(ctx: &RuleContext<'_>, wanted: PeriodType) -> Vec<Finding> {
    ctx.periods
        .requests
        .iter()
        .filter(|(_, period_type)| *period_type == wanted)
        .map(|(r, _)| finding![&r.request.name, r.request.pe.join(",")])
        .collect()
}

/// Indicators placed in requests of different periodicities.
///
/// Bucket pairs are compared in monthly, quarterly, yearly order. In
/// [`PeriodConflictMode::PerIndicator`] an indicator is reported once even if
/// it spans all three periodicities.
pub fn period_conflicts(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let periodicities = Periodicity::all();
    let mut conflicting: Vec<&str> = Vec::new();

    for (i, left) in periodicities.iter().enumerate() {
        for id in ctx.periods.bucket(*left) {
            for right in &periodicities[i + 1..] {
                if !ctx.periods.bucket(*right).contains(id) {
                    continue;
                }
                match ctx.options.period_conflicts {
                    PeriodConflictMode::PerIndicator if conflicting.contains(id) => {}
                    _ => conflicting.push(id),
                }
            }
        }
    }

    conflicting
        .into_iter()
        .map(|id| {
            finding![
                ctx.indicator_name(id).unwrap_or(UNKNOWN),
                id,
                ctx.requests_with_indicator(id).join(", "),
            ]
        })
        .collect()
}

/// Requests containing at least one fixed or unsupported period.
pub fn non_relative_periods(ctx: &RuleContext<'_>) -> Vec<Finding> {
    ctx.requests()
        .filter(|r| r.request.pe.iter().any(|pe| !is_relative(pe)))
        .map(|r| finding![&r.request.name, r.request.pe.join(",")])
        .collect()
}
