//! The bundle of snapshots one validation run operates on.

use serde::{Deserialize, Serialize};

use crate::exchange::DataExchange;
use crate::indicator::Indicator;
use crate::metadata::{DataElement, DataElementOperand, DataSet, SystemInfo};
use crate::org_unit::OrganisationUnit;
use crate::package::MetadataPackage;
use crate::release::ReleaseDescriptor;

/// Read-only inputs of a validation run.
///
/// `None` marks an absent snapshot: the fetch failed or returned an empty
/// collection. Collections are never `Some(vec![])`; use [`crate::non_empty`]
/// when populating them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshots {
    pub system_info: Option<SystemInfo>,
    pub indicators: Option<Vec<Indicator>>,
    pub exchanges: Option<Vec<DataExchange>>,
    pub root_org_unit: Option<OrganisationUnit>,
    pub operands: Option<Vec<DataElementOperand>>,
    pub data_elements: Option<Vec<DataElement>>,
    pub data_sets: Option<Vec<DataSet>>,
    pub reference_package: Option<MetadataPackage>,
    pub package_release: Option<ReleaseDescriptor>,
    pub app_release: Option<ReleaseDescriptor>,
    pub local_app_version: Option<String>,
}

impl Snapshots {
    /// Indicators, or an empty slice when absent.
    #[must_use]
    pub fn indicators(&self) -> &[Indicator] {
        self.indicators.as_deref().unwrap_or_default()
    }

    /// Exchanges, or an empty slice when absent.
    #[must_use]
    pub fn exchanges(&self) -> &[DataExchange] {
        self.exchanges.as_deref().unwrap_or_default()
    }

    /// Look up an indicator by id.
    #[must_use]
    pub fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.indicators().iter().find(|indicator| indicator.id == id)
    }
}
