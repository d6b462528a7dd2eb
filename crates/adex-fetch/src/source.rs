//! The documents a validation run needs and the trait that supplies them.

use std::fmt;

use serde_json::Value;

use crate::error::Result;

/// One snapshot document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    SystemInfo,
    Indicators,
    Exchanges,
    OrganisationUnits,
    Operands,
    DataElements,
    DataSets,
    ReferencePackage,
    InstalledApps,
    PackageRelease,
    AppRelease,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::SystemInfo,
        Resource::Indicators,
        Resource::Exchanges,
        Resource::OrganisationUnits,
        Resource::Operands,
        Resource::DataElements,
        Resource::DataSets,
        Resource::ReferencePackage,
        Resource::InstalledApps,
        Resource::PackageRelease,
        Resource::AppRelease,
    ];

    /// File name inside an offline export directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::SystemInfo => "systemInfo.json",
            Self::Indicators => "indicators.json",
            Self::Exchanges => "aggregateDataExchanges.json",
            Self::OrganisationUnits => "organisationUnits.json",
            Self::Operands => "dataElementOperands.json",
            Self::DataElements => "dataElements.json",
            Self::DataSets => "dataSets.json",
            Self::ReferencePackage => "referencePackage.json",
            Self::InstalledApps => "apps.json",
            Self::PackageRelease => "packageRelease.json",
            Self::AppRelease => "appRelease.json",
        }
    }

    /// Web API path relative to `<server>/api/`.
    ///
    /// Releases are served by a separate release API and have no platform path.
    pub fn api_path(&self) -> Option<&'static str> {
        match self {
            Self::SystemInfo => Some("system/info.json"),
            Self::Indicators => {
                Some("indicators.json?filter=name:$like:[GFADEX]&fields=:owner&paging=false")
            }
            Self::Exchanges => Some(
                "aggregateDataExchanges.json?filter=target.api.url:like:globalfund&fields=*&paging=false",
            ),
            Self::OrganisationUnits => {
                Some("organisationUnits.json?filter=level:eq:1&fields=id,name,code,attributeValues[*]")
            }
            Self::Operands => Some("dataElementOperands.json?fields=id,shortName,dimensionItem&paging=false"),
            Self::DataElements => Some("dataElements.json?fields=id,shortName&paging=false"),
            Self::DataSets => Some("dataSets.json?fields=id,name&paging=false"),
            Self::ReferencePackage => Some("dataStore/gfadex/remote"),
            Self::InstalledApps => Some("apps"),
            Self::PackageRelease | Self::AppRelease => None,
        }
    }

    /// Key wrapping the collection in Web API responses.
    pub fn collection_key(&self) -> Option<&'static str> {
        match self {
            Self::Indicators => Some("indicators"),
            Self::Exchanges => Some("aggregateDataExchanges"),
            Self::OrganisationUnits => Some("organisationUnits"),
            Self::Operands => Some("dataElementOperands"),
            Self::DataElements => Some("dataElements"),
            Self::DataSets => Some("dataSets"),
            Self::InstalledApps => Some("apps"),
            _ => None,
        }
    }

    /// Documents whose absence is expected and not worth a warning.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::InstalledApps | Self::PackageRelease | Self::AppRelease)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SystemInfo => "system info",
            Self::Indicators => "indicators",
            Self::Exchanges => "data exchanges",
            Self::OrganisationUnits => "root organisation unit",
            Self::Operands => "data element operands",
            Self::DataElements => "data elements",
            Self::DataSets => "data sets",
            Self::ReferencePackage => "reference metadata package",
            Self::InstalledApps => "installed apps",
            Self::PackageRelease => "package release",
            Self::AppRelease => "app release",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supplies raw JSON documents for a validation run.
///
/// `Ok(None)` means the source is not configured for that document (for
/// example no release URL was given). Errors are degraded to absent snapshots
/// by [`collect_snapshots`](crate::collect_snapshots).
pub trait SnapshotSource {
    fn fetch(&self, resource: Resource) -> Result<Option<Value>>;

    /// Human-readable origin for log messages.
    fn describe(&self) -> String;
}
