//! Root organisation unit country code check.

use adex_model::UNKNOWN;

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;
use crate::tables::is_iso3_code;

/// The root unit must carry an eligible ISO3 code as its code or in the ISO3 attribute.
pub fn country_code(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let Some(root) = ctx.snapshots.root_org_unit.as_ref() else {
        return vec![finding![UNKNOWN, UNKNOWN, UNKNOWN]];
    };

    let code = root.code.as_deref();
    let attribute = root.attribute_value(&ctx.options.iso3_attribute_id);
    if code.is_some_and(is_iso3_code) || attribute.is_some_and(is_iso3_code) {
        return Vec::new();
    }

    vec![finding![
        &root.name,
        code.unwrap_or(UNKNOWN),
        attribute.unwrap_or(UNKNOWN),
    ]]
}
