//! Aggregate data exchanges and their requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Public access token meaning "no public access".
pub const NO_PUBLIC_ACCESS: &str = "--------";

/// A configured channel that pushes aggregated values to a remote server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExchange {
    pub id: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub sharing: Option<Sharing>,
    /// Legacy top-level user group access list.
    #[serde(default)]
    pub user_group_accesses: Option<Vec<AccessEntry>>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub target: Target,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub source: Source,
}

impl DataExchange {
    /// Whether public access is anything other than the "no access" sentinel.
    ///
    /// A missing sharing descriptor counts as public.
    #[must_use]
    pub fn is_publicly_shared(&self) -> bool {
        self.sharing
            .as_ref()
            .and_then(|sharing| sharing.public.as_deref())
            != Some(NO_PUBLIC_ACCESS)
    }

    /// Whether at least one user group has been granted access.
    #[must_use]
    pub fn has_user_group_access(&self) -> bool {
        let legacy = self
            .user_group_accesses
            .as_ref()
            .is_some_and(|entries| !entries.is_empty());
        let modern = self
            .sharing
            .as_ref()
            .is_some_and(|sharing| !sharing.user_groups.is_empty());
        legacy || modern
    }

    /// Requests of this exchange in declaration order.
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.source.requests
    }
}

/// Sharing descriptor shared by most platform objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sharing {
    #[serde(default)]
    pub public: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub user_groups: BTreeMap<String, AccessEntry>,
}

/// One user or user group access grant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub api: TargetApi,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub request: TargetRequest,
}

/// Remote server connection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetApi {
    #[serde(default)]
    pub url: Option<String>,
    /// Present only when basic authentication is configured.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRequest {
    #[serde(default)]
    pub org_unit_id_scheme: Option<String>,
    #[serde(default)]
    pub id_scheme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub requests: Vec<Request>,
}

/// A query selecting indicators (`dx`), periods (`pe`) and org units (`ou`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub dx: Vec<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub pe: Vec<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub ou: Vec<String>,
    #[serde(default)]
    pub output_id_scheme: Option<String>,
}

impl Request {
    /// Whether this request references the given indicator.
    #[must_use]
    pub fn contains_indicator(&self, id: &str) -> bool {
        self.dx.iter().any(|dx| dx == id)
    }
}
