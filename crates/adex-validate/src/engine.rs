//! Validation run orchestration.

use adex_model::Snapshots;
use tracing::{debug, info, info_span};

use crate::catalog::{Finding, RuleKey, RunStatus, ValidationReport};
use crate::checks::{exchanges, indicators, org_unit, periods, reference, requests, versions};
use crate::context::RuleContext;
use crate::error::{Result, ValidationError};
use crate::options::ValidationOptions;

/// Which snapshots a rule needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Runs only when at least one exchange was fetched.
    RequiresExchanges,
    /// Runs only when at least one indicator was fetched.
    RequiresIndicators,
    /// Always runs on a complete reference package.
    Always,
}

impl Scope {
    fn applies(self, snapshots: &Snapshots) -> bool {
        match self {
            Self::RequiresExchanges => !snapshots.exchanges().is_empty(),
            Self::RequiresIndicators => !snapshots.indicators().is_empty(),
            Self::Always => true,
        }
    }
}

/// A rule paired with its evaluation function.
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    pub key: RuleKey,
    pub scope: Scope,
    pub evaluate: fn(&RuleContext<'_>) -> Vec<Finding>,
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

const fn rule(key: RuleKey, scope: Scope, evaluate: fn(&RuleContext<'_>) -> Vec<Finding>) -> RuleDescriptor {
    RuleDescriptor { key, scope, evaluate }
}

/// Every rule, in canonical catalog order.
pub const RULES: &[RuleDescriptor] = &[
    rule(RuleKey::ReqIndDuplicated, Scope::RequiresExchanges, requests::duplicated_indicators),
    rule(RuleKey::ReqIndUnconf, Scope::RequiresExchanges, requests::unconfigured_indicators),
    rule(RuleKey::ReqIndNongf, Scope::RequiresExchanges, requests::foreign_indicators),
    rule(RuleKey::ReqPeMixed, Scope::RequiresExchanges, periods::mixed_periods),
    rule(RuleKey::ReqPeUnknown, Scope::RequiresExchanges, periods::unknown_periods),
    rule(RuleKey::ReqIndPeriodConflict, Scope::RequiresExchanges, periods::period_conflicts),
    rule(RuleKey::ReqPeRelative, Scope::RequiresExchanges, periods::non_relative_periods),
    rule(RuleKey::IndConfIgnored, Scope::RequiresExchanges, indicators::configured_but_ignored),
    rule(RuleKey::IndDenomChanged, Scope::RequiresIndicators, indicators::denominator_changed),
    rule(RuleKey::IndDecimalsChanged, Scope::RequiresIndicators, indicators::decimals_changed),
    rule(RuleKey::IndImplementerType, Scope::RequiresIndicators, indicators::implementer_type),
    rule(RuleKey::ExPublicSharing, Scope::RequiresExchanges, exchanges::public_sharing),
    rule(RuleKey::ExUsergroupSharing, Scope::RequiresExchanges, exchanges::user_group_sharing),
    rule(RuleKey::ReqOutputIdScheme, Scope::RequiresExchanges, requests::output_id_scheme),
    rule(RuleKey::ExTargetApi, Scope::RequiresExchanges, exchanges::target_api),
    rule(RuleKey::ExBasicAuth, Scope::RequiresExchanges, exchanges::basic_auth),
    rule(RuleKey::ReqRootOrgunit, Scope::RequiresExchanges, requests::root_org_unit),
    rule(RuleKey::OrgunitCode, Scope::Always, org_unit::country_code),
    rule(RuleKey::ExTargetOuScheme, Scope::RequiresExchanges, exchanges::target_org_unit_scheme),
    rule(RuleKey::ExTargetIdScheme, Scope::RequiresExchanges, exchanges::target_id_scheme),
    rule(RuleKey::ExExist, Scope::Always, exchanges::exchanges_exist),
    rule(RuleKey::IndsExist, Scope::Always, indicators::indicators_exist),
    rule(RuleKey::ReferenceMetadata, Scope::Always, reference::package_contents),
    rule(RuleKey::IndUnknownInRequests, Scope::RequiresExchanges, indicators::unknown_in_requests),
    rule(
        RuleKey::IndMutuallyExclusiveAgeBands,
        Scope::RequiresExchanges,
        indicators::mutually_exclusive_age_bands,
    ),
    rule(RuleKey::MetadataPackageVersion, Scope::Always, versions::metadata_package_version),
    rule(RuleKey::AppVersion, Scope::Always, versions::app_version),
    rule(
        RuleKey::SingleImplementerType,
        Scope::RequiresExchanges,
        indicators::single_implementer_type,
    ),
];

/// Run every applicable rule against the snapshots and return a fresh report.
///
/// # Errors
///
/// Returns [`ValidationError::ReferencePackageMissing`] when no reference
/// package was fetched. A package lacking required keys is not an error: the
/// report then holds only the missing-keys finding.
pub fn run_validation(snapshots: &Snapshots, options: &ValidationOptions) -> Result<ValidationReport> {
    let _span = info_span!("validation_run").entered();

    let package = snapshots
        .reference_package
        .as_ref()
        .ok_or(ValidationError::ReferencePackageMissing)?;

    let mut report = ValidationReport::empty();

    let missing = package.missing_keys();
    if !missing.is_empty() {
        info!(missing = ?missing, "Reference package incomplete, skipping rules");
        report.record(RuleKey::ReferenceMetadata, vec![reference::missing_keys(&missing)]);
        report.status = RunStatus::ShortCircuited {
            missing_keys: missing.iter().map(ToString::to_string).collect(),
        };
        return Ok(report);
    }

    let ctx = RuleContext::new(snapshots, package, options);
    info!(
        indicators = ctx.indicators().len(),
        configured = ctx.partition.configured.len(),
        exchanges = ctx.exchanges().len(),
        "Running validation rules"
    );

    for descriptor in RULES {
        if !descriptor.scope.applies(snapshots) {
            debug!(rule = %descriptor.key, "Skipping rule, required snapshots absent");
            continue;
        }
        let findings = (descriptor.evaluate)(&ctx);
        debug!(rule = %descriptor.key, findings = findings.len(), "Rule evaluated");
        report.record(descriptor.key, findings);
    }

    info!(total = report.total_findings(), "Validation complete");
    Ok(report)
}
