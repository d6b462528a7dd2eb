//! Typed snapshot records for ADEx configuration auditing.
//!
//! Every record mirrors the JSON shape returned by the platform Web API. Only
//! the fields consumed by the audit are modelled; unknown fields are ignored.
//! Fields the platform may omit are `Option`s so that rule code can treat a
//! missing value as the non-compliant case instead of failing to parse.

pub mod error;
pub mod exchange;
pub mod indicator;
pub mod metadata;
pub mod org_unit;
pub mod package;
pub mod release;
pub mod snapshots;
pub mod wire;

pub use error::{ModelError, Result};
pub use exchange::{AccessEntry, DataExchange, Request, Sharing, Source, Target, TargetApi, TargetRequest};
pub use indicator::Indicator;
pub use metadata::{DataElement, DataElementOperand, DataSet, SystemInfo};
pub use org_unit::{AttributeRef, AttributeValue, OrganisationUnit};
pub use package::{MetadataPackage, PackageIndicator, PackageInfo, REQUIRED_PACKAGE_KEYS};
pub use release::ReleaseDescriptor;
pub use snapshots::Snapshots;
pub use wire::{collection_items, collection_records, non_empty, null_as_default};

/// Placeholder rendered wherever a value is absent from a snapshot.
pub const UNKNOWN: &str = "UNKNOWN";
