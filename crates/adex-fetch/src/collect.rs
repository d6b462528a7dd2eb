//! Turn raw documents into typed snapshots, degrading failures to absence.

use adex_model::{
    DataExchange, Indicator, MetadataPackage, OrganisationUnit, ReleaseDescriptor, Snapshots, SystemInfo,
    collection_records, non_empty,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::error::{FetchError, Result};
use crate::source::{Resource, SnapshotSource};

/// Key of the installed auditing app, used to read its local version.
pub const DEFAULT_APP_KEY: &str = "adex-flow";

/// Exchanges belong to the program when their target URL contains this.
pub const PROGRAM_TARGET_MARKER: &str = "globalfund";

/// Program indicators carry this marker in their name.
pub const PROGRAM_INDICATOR_MARKER: &str = "GFADEX";

/// An entry of the installed apps listing.
#[derive(Debug, Clone, Deserialize)]
struct InstalledApp {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Fetch every resource and assemble the snapshot bundle.
///
/// A failed or malformed document is logged and becomes an absent snapshot;
/// empty collections are absent as well. A single malformed record is logged
/// and skipped without dropping the rest of its collection. Exchanges and
/// indicators are narrowed to the program here, whatever the source. Nothing
/// here is fatal: whether an absent reference package stops the run is
/// decided by the engine.
pub fn collect_snapshots(source: &dyn SnapshotSource, app_key: &str) -> Snapshots {
    let _span = info_span!("fetch", source = %source.describe()).entered();

    let snapshots = Snapshots {
        system_info: fetch_record::<SystemInfo>(source, Resource::SystemInfo),
        indicators: fetch_program_collection(source, Resource::Indicators, is_program_indicator),
        exchanges: fetch_program_collection(source, Resource::Exchanges, is_program_exchange),
        root_org_unit: fetch_root_org_unit(source),
        operands: fetch_collection(source, Resource::Operands),
        data_elements: fetch_collection(source, Resource::DataElements),
        data_sets: fetch_collection(source, Resource::DataSets),
        reference_package: fetch_record::<MetadataPackage>(source, Resource::ReferencePackage),
        package_release: fetch_record::<ReleaseDescriptor>(source, Resource::PackageRelease),
        app_release: fetch_record::<ReleaseDescriptor>(source, Resource::AppRelease),
        local_app_version: fetch_local_app_version(source, app_key),
    };

    info!(
        indicators = snapshots.indicators().len(),
        exchanges = snapshots.exchanges().len(),
        reference_package = snapshots.reference_package.is_some(),
        "Collected snapshots"
    );
    snapshots
}

/// Fetch a document, logging and swallowing failures.
fn fetch_value(source: &dyn SnapshotSource, resource: Resource) -> Option<Value> {
    match source.fetch(resource) {
        Ok(Some(value)) => Some(value),
        Ok(None) => None,
        Err(err) => {
            if resource.is_optional() {
                debug!(%resource, error = %err, "Optional snapshot unavailable");
            } else {
                warn!(%resource, error = %err, "Snapshot unavailable, continuing without it");
            }
            None
        }
    }
}

fn degrade<T>(resource: Resource, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%resource, error = %err, "Malformed snapshot, continuing without it");
            None
        }
    }
}

fn fetch_record<T: DeserializeOwned>(source: &dyn SnapshotSource, resource: Resource) -> Option<T> {
    let value = fetch_value(source, resource)?;
    degrade(
        resource,
        serde_json::from_value(value).map_err(|source| FetchError::Json {
            resource: resource.label().to_string(),
            source,
        }),
    )
}

/// Parse a collection record by record, skipping the records that do not parse.
fn fetch_items<T: DeserializeOwned>(source: &dyn SnapshotSource, resource: Resource) -> Option<Vec<T>> {
    let value = fetch_value(source, resource)?;
    let key = resource.collection_key().unwrap_or(resource.label());
    let records = degrade(resource, collection_records(value, key).map_err(FetchError::from))?;
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match record {
            Ok(item) => items.push(item),
            Err(err) => warn!(%resource, index, error = %err, "Skipping malformed record"),
        }
    }
    Some(items)
}

fn fetch_collection<T: DeserializeOwned>(source: &dyn SnapshotSource, resource: Resource) -> Option<Vec<T>> {
    let items = non_empty(fetch_items(source, resource)?);
    if items.is_none() {
        debug!(%resource, "Empty collection");
    }
    items
}

/// Like [`fetch_collection`], keeping only the records that belong to the program.
fn fetch_program_collection<T: DeserializeOwned>(
    source: &dyn SnapshotSource,
    resource: Resource,
    belongs: fn(&T) -> bool,
) -> Option<Vec<T>> {
    let mut items: Vec<T> = fetch_items(source, resource)?;
    let fetched = items.len();
    items.retain(belongs);
    if items.len() < fetched {
        debug!(%resource, dropped = fetched - items.len(), "Ignoring records outside the program");
    }
    let items = non_empty(items);
    if items.is_none() {
        debug!(%resource, "No program records");
    }
    items
}

fn is_program_exchange(exchange: &DataExchange) -> bool {
    exchange
        .target
        .api
        .url
        .as_deref()
        .is_some_and(|url| url.to_ascii_lowercase().contains(PROGRAM_TARGET_MARKER))
}

fn is_program_indicator(indicator: &Indicator) -> bool {
    indicator
        .name
        .to_ascii_uppercase()
        .contains(PROGRAM_INDICATOR_MARKER)
}

/// The first level-one organisation unit.
fn fetch_root_org_unit(source: &dyn SnapshotSource) -> Option<OrganisationUnit> {
    let units: Vec<OrganisationUnit> = fetch_items(source, Resource::OrganisationUnits)?;
    if units.len() > 1 {
        warn!(count = units.len(), "Several root organisation units, using the first");
    }
    units.into_iter().next()
}

/// Version of the installed app with the given key.
fn fetch_local_app_version(source: &dyn SnapshotSource, app_key: &str) -> Option<String> {
    let apps: Vec<InstalledApp> = fetch_items(source, Resource::InstalledApps)?;
    let version = apps
        .into_iter()
        .find(|app| app.key.as_deref() == Some(app_key))
        .and_then(|app| app.version);
    if version.is_none() {
        debug!(app_key, "App not installed or without version");
    }
    version
}
