//! Local versus latest-release version checks.

use adex_model::UNKNOWN;
use tracing::{debug, warn};

use crate::catalog::Finding;
use crate::context::RuleContext;
use crate::finding;
use crate::options::VersionPolicy;
use crate::version::Version;

pub fn metadata_package_version(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let Some(release) = ctx.snapshots.package_release.as_ref() else {
        debug!("No metadata package release available, skipping version check");
        return Vec::new();
    };
    compare(
        "metadata package",
        &release.tag_name,
        ctx.package.version(),
        ctx.options.version_policy,
    )
}

pub fn app_version(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let Some(release) = ctx.snapshots.app_release.as_ref() else {
        debug!("No app release available, skipping version check");
        return Vec::new();
    };
    compare(
        "app",
        &release.tag_name,
        ctx.snapshots.local_app_version.as_deref(),
        ctx.options.version_policy,
    )
}

/// One finding with the raw strings when both versions parse and differ.
///
/// Unparseable versions follow the policy: skipped with a warning, or reported as is.
fn compare(what: &str, remote: &str, local: Option<&str>, policy: VersionPolicy) -> Vec<Finding> {
    let remote_version = remote.parse::<Version>();
    let local_version = local.map(str::parse::<Version>);

    match (remote_version, local_version) {
        (Ok(remote_version), Some(Ok(local_version))) => {
            if remote_version == local_version {
                Vec::new()
            } else {
                vec![finding![remote, local.unwrap_or(UNKNOWN)]]
            }
        }
        _ => match policy {
            VersionPolicy::Skip => {
                warn!(
                    remote,
                    local = local.unwrap_or(UNKNOWN),
                    "Invalid {} version, skipping comparison",
                    what
                );
                Vec::new()
            }
            VersionPolicy::Report => vec![finding![remote, local.unwrap_or(UNKNOWN)]],
        },
    }
}
