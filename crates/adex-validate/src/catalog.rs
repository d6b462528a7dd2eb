//! Rule catalog and report types.
//!
//! The catalog is fixed at compile time: [`RuleKey::ALL`] lists every rule in
//! canonical report order, and each key maps to a static [`RuleDefinition`].
//! A validation run produces a [`ValidationReport`] holding one
//! [`RuleResult`] per key, built fresh for every run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKey {
    ReqIndDuplicated,
    ReqIndUnconf,
    ReqIndNongf,
    ReqPeMixed,
    ReqPeUnknown,
    ReqIndPeriodConflict,
    ReqPeRelative,
    IndConfIgnored,
    IndDenomChanged,
    IndDecimalsChanged,
    IndImplementerType,
    ExPublicSharing,
    ExUsergroupSharing,
    ReqOutputIdScheme,
    ExTargetApi,
    ExBasicAuth,
    ReqRootOrgunit,
    OrgunitCode,
    ExTargetOuScheme,
    ExTargetIdScheme,
    ExExist,
    IndsExist,
    ReferenceMetadata,
    IndUnknownInRequests,
    IndMutuallyExclusiveAgeBands,
    MetadataPackageVersion,
    AppVersion,
    SingleImplementerType,
}

/// Static description of a rule: what it checks and how findings are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDefinition {
    pub key: RuleKey,
    pub title: &'static str,
    /// Remediation text shown with the findings.
    pub instruction: &'static str,
    /// Column headers; every finding of the rule has this arity.
    pub headers: &'static [&'static str],
}

impl RuleKey {
    /// Every rule in canonical report order.
    pub const ALL: [RuleKey; 28] = [
        Self::ReqIndDuplicated,
        Self::ReqIndUnconf,
        Self::ReqIndNongf,
        Self::ReqPeMixed,
        Self::ReqPeUnknown,
        Self::ReqIndPeriodConflict,
        Self::ReqPeRelative,
        Self::IndConfIgnored,
        Self::IndDenomChanged,
        Self::IndDecimalsChanged,
        Self::IndImplementerType,
        Self::ExPublicSharing,
        Self::ExUsergroupSharing,
        Self::ReqOutputIdScheme,
        Self::ExTargetApi,
        Self::ExBasicAuth,
        Self::ReqRootOrgunit,
        Self::OrgunitCode,
        Self::ExTargetOuScheme,
        Self::ExTargetIdScheme,
        Self::ExExist,
        Self::IndsExist,
        Self::ReferenceMetadata,
        Self::IndUnknownInRequests,
        Self::IndMutuallyExclusiveAgeBands,
        Self::MetadataPackageVersion,
        Self::AppVersion,
        Self::SingleImplementerType,
    ];

    /// Upper-case key as used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReqIndDuplicated => "REQ_IND_DUPLICATED",
            Self::ReqIndUnconf => "REQ_IND_UNCONF",
            Self::ReqIndNongf => "REQ_IND_NONGF",
            Self::ReqPeMixed => "REQ_PE_MIXED",
            Self::ReqPeUnknown => "REQ_PE_UNKNOWN",
            Self::ReqIndPeriodConflict => "REQ_IND_PERIOD_CONFLICT",
            Self::ReqPeRelative => "REQ_PE_RELATIVE",
            Self::IndConfIgnored => "IND_CONF_IGNORED",
            Self::IndDenomChanged => "IND_DENOM_CHANGED",
            Self::IndDecimalsChanged => "IND_DECIMALS_CHANGED",
            Self::IndImplementerType => "IND_IMPLEMENTER_TYPE",
            Self::ExPublicSharing => "EX_PUBLIC_SHARING",
            Self::ExUsergroupSharing => "EX_USERGROUP_SHARING",
            Self::ReqOutputIdScheme => "REQ_OUTPUT_ID_SCHEME",
            Self::ExTargetApi => "EX_TARGET_API",
            Self::ExBasicAuth => "EX_BASIC_AUTH",
            Self::ReqRootOrgunit => "REQ_ROOT_ORGUNIT",
            Self::OrgunitCode => "ORGUNIT_CODE",
            Self::ExTargetOuScheme => "EX_TARGET_OU_SCHEME",
            Self::ExTargetIdScheme => "EX_TARGET_ID_SCHEME",
            Self::ExExist => "EX_EXIST",
            Self::IndsExist => "INDS_EXIST",
            Self::ReferenceMetadata => "REFERENCE_METADATA",
            Self::IndUnknownInRequests => "IND_UNKNOWN_IN_REQUESTS",
            Self::IndMutuallyExclusiveAgeBands => "IND_MUTUALLY_EXCLUSIVE_AGE_BANDS",
            Self::MetadataPackageVersion => "METADATA_PACKAGE_VERSION",
            Self::AppVersion => "APP_VERSION",
            Self::SingleImplementerType => "SINGLE_IMPLEMENTER_TYPE",
        }
    }

    /// Parse a key from its upper-case form (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
    }

    /// Static definition of this rule.
    pub fn definition(&self) -> &'static RuleDefinition {
        match self {
            Self::ReqIndDuplicated => &RuleDefinition {
                key: Self::ReqIndDuplicated,
                title: "Requests with duplicate indicators",
                instruction: "GF ADEx requests with the same indicator repeated in the `dx` section. Resolve the duplicates listed below.",
                headers: &["Request", "Duplicates"],
            },
            Self::ReqIndUnconf => &RuleDefinition {
                key: Self::ReqIndUnconf,
                title: "Requests with indicators that are not configured",
                instruction: "GF ADEx requests that include indicators that are not configured, meaning their numerator is 0. These indicators should either be configured, or removed from the request.",
                headers: &["Request", "Indicator name", "Indicator id", "Numerator"],
            },
            Self::ReqIndNongf => &RuleDefinition {
                key: Self::ReqIndNongf,
                title: "Requests with non-GFADEx indicators",
                instruction: "GFADEx requests with indicators that are not GFADEx indicators. Only GFADEx indicators should be included in GFADEx requests. Remove the unknown indicators from the GFADEx requests.",
                headers: &["Request", "Indicator ID"],
            },
            Self::ReqPeMixed => &RuleDefinition {
                key: Self::ReqPeMixed,
                title: "Requests with mixed period types",
                instruction: "GF ADEx requests should not contain periods of different period types. Revise the requests to include only one period type.",
                headers: &["Request", "Request period"],
            },
            Self::ReqPeUnknown => &RuleDefinition {
                key: Self::ReqPeUnknown,
                title: "Requests with unsupported period types",
                instruction: "GF ADEx requests should only consist of monthly, quarterly, or yearly periods. Revise the requests to include only one of these types.",
                headers: &["Request", "Request period"],
            },
            Self::ReqIndPeriodConflict => &RuleDefinition {
                key: Self::ReqIndPeriodConflict,
                title: "Indicators in multiple requests with different period types",
                instruction: "GF ADEx indicators may be used in multiple requests, but they should never be used in requests with periods which overlap. Carefully review the requests listed below to ensure that the periods do not overlap with one another.",
                headers: &["Indicator name", "Indicator id", "Request"],
            },
            Self::ReqPeRelative => &RuleDefinition {
                key: Self::ReqPeRelative,
                title: "Requests with non-relative period types",
                instruction: "GF ADEx requests should usually only contain relative periods. Review the affected requests and consider changing the periods to relative periods.",
                headers: &["Request", "Request period"],
            },
            Self::IndConfIgnored => &RuleDefinition {
                key: Self::IndConfIgnored,
                title: "Indicators that are configured but not in requests",
                instruction: "Usually, GF ADEx indicators that have been configured (numerator != 0), should be part of a request. Carefully review all of the listed indicators to ensure that they are not needed in any of the requests. Consider deleting these indicators if they are not needed.",
                headers: &["Indicator name", "Indicator id"],
            },
            Self::IndDenomChanged => &RuleDefinition {
                key: Self::IndDenomChanged,
                title: "GF ADEx indicators with modified denominator",
                instruction: "All GF ADEx indicators should have a denominator of '1'. Revise the indicators listed below to ensure that the denominator is set to '1'.",
                headers: &["Indicator name", "Indicator id", "Denominator"],
            },
            Self::IndDecimalsChanged => &RuleDefinition {
                key: Self::IndDecimalsChanged,
                title: "GF ADEx indicators with modified decimals",
                instruction: "All GF ADEx indicators should have the number of decimals set to '0'. For each indicator listed, change the \"Decimals in data output\" property of the indicator to '0' using the Maintenance app.",
                headers: &["Indicator name", "Indicator id", "Decimals"],
            },
            Self::IndImplementerType => &RuleDefinition {
                key: Self::IndImplementerType,
                title: "GF ADEx indicators with incorrect implementer type",
                instruction: "GF ADEx indicators should be associated with a valid implementer type. For each indicator listed, change the \"Attribute option combination for data export\" to a valid implementer type UID. Consult the documentation for a list of possible values.",
                headers: &["Indicator name", "Indicator id", "Implementer type"],
            },
            Self::ExPublicSharing => &RuleDefinition {
                key: Self::ExPublicSharing,
                title: "GF ADEx exchanges should not be publicly shared",
                instruction: "GF ADEx exchanges should only be shared with specific users or user groups. Remove the public sharing from the exchanges listed below and share them with specific users instead.",
                headers: &["Exchange name"],
            },
            Self::ExUsergroupSharing => &RuleDefinition {
                key: Self::ExUsergroupSharing,
                title: "GF ADEx exchanges should be shared with user groups",
                instruction: "GF ADEx exchanges should be shared with user groups who either need access to view them or who have access to actually submit a data exchange. Add user groups with appropriate permissions to the exchanges listed below.",
                headers: &["Exchange name"],
            },
            Self::ReqOutputIdScheme => &RuleDefinition {
                key: Self::ReqOutputIdScheme,
                title: "GF ADEx requests should use the correct attribute output scheme",
                instruction: "GF ADEx requests should use the correct attribute output scheme specifically (\"outputIdScheme\": \"attribute:nHzX73VyNun\"). Revise the requests listed below to ensure that the output ID scheme is set correctly.",
                headers: &["Request", "Output ID scheme"],
            },
            Self::ExTargetApi => &RuleDefinition {
                key: Self::ExTargetApi,
                title: "GF ADEx exchanges should use the correct target server.",
                instruction: "GF ADEx exchanges should use the correct target server: https://adex.theglobalfund.org. Note, during testing you should use the UAT server at https://uat.adex.theglobalfund.org. However, once you move your exchange to production, be sure that the target API is set to the correct server.",
                headers: &["Exchange name", "Target API"],
            },
            Self::ExBasicAuth => &RuleDefinition {
                key: Self::ExBasicAuth,
                title: "GF ADEx exchanges should not use basic authentication.",
                instruction: "GF ADEx exchanges should use a personal access token instead of basic authentication. Remove any basic authentication credentials from the exchanges listed below and replace them with a DHIS2 personal access token.",
                headers: &["Exchange name", "Username"],
            },
            Self::ReqRootOrgunit => &RuleDefinition {
                key: Self::ReqRootOrgunit,
                title: "GF ADEx requests should be aggregated to the level 1 organisation unit.",
                instruction: "Currently, GF ADEx requests should be aggregated to the level 1 organisation unit. Revise the requests listed below to ensure that the organisation unit is set to the level 1 organisation unit (National level).",
                headers: &["Request", "Organisation unit"],
            },
            Self::OrgunitCode => &RuleDefinition {
                key: Self::OrgunitCode,
                title: "The root organisation unit should have a valid ISO3 code as the code or as an attribute",
                instruction: "Check to be sure that you have defined either the code or attribute for your country with the correct ISO3 code. Consult the GF ADEx documentation for a list of valid ISO3 codes.",
                headers: &["Organisation unit", "Code", "Attribute"],
            },
            Self::ExTargetOuScheme => &RuleDefinition {
                key: Self::ExTargetOuScheme,
                title: "GF ADEx exchanges should use the correct target organisation unit scheme.",
                instruction: "GF ADEx exchanges should use \"CODE\" as the target organisation unit scheme. Revise the exchanges listed below and change the target organisation unit scheme to \"CODE\".",
                headers: &["Exchange name", "Target OU scheme"],
            },
            Self::ExTargetIdScheme => &RuleDefinition {
                key: Self::ExTargetIdScheme,
                title: "GF ADEx exchanges should use the correct target ID scheme.",
                instruction: "GF ADEx exchanges should use \"UID\" as the target ID scheme. Revise the exchanges listed below and change the target ID scheme to \"UID\".",
                headers: &["Exchange name", "Target ID scheme"],
            },
            Self::ExExist => &RuleDefinition {
                key: Self::ExExist,
                title: "At least one GF ADEx data exchange should exist",
                instruction: "At least one aggregate data exchange with a target API URL containing \"globalfund\" should exist.",
                headers: &["Exchange name"],
            },
            Self::IndsExist => &RuleDefinition {
                key: Self::IndsExist,
                title: "At least one GF indicator should exist.",
                instruction: "If you have not already imported the GF ADEx metadata package, you should do so now.",
                headers: &["Indicator name"],
            },
            Self::ReferenceMetadata => &RuleDefinition {
                key: Self::ReferenceMetadata,
                title: "The GFADEX reference metadata package should be imported to the datastore.",
                instruction: "If you have not already imported a GFADEX metadata package, you should do so now using the GF ADEx Flow app.",
                headers: &["Message"],
            },
            Self::IndUnknownInRequests => &RuleDefinition {
                key: Self::IndUnknownInRequests,
                title: "GFADEX requests should not include indicators that are not in the GFADEX metadata package.",
                instruction: "Unknown GF ADEx indicators should not be used in any requests made to the GF ADEx server. Remove the unknown indicators from the GF ADEx requests.",
                headers: &["ID", "Indicator name"],
            },
            Self::IndMutuallyExclusiveAgeBands => &RuleDefinition {
                key: Self::IndMutuallyExclusiveAgeBands,
                title: "Indicators which have defined mutually exclusive age bands.",
                instruction: "Certain GF ADEx indicators have a category combination with non-mutually exclusive age bands. You should not submit age bands which overlap with one another. For instance, if you submit <5, 5-14, you should not also submit <15 for the same GF ADEx indicator. You should use either the fine age bands or the coarse age bands, but not both. Please remove the coarse age band if you can map the fine age bands. Review the indicators listed below and ensure that the age bands are mutually exclusive for the same indicator.",
                headers: &["Indicator name"],
            },
            Self::MetadataPackageVersion => &RuleDefinition {
                key: Self::MetadataPackageVersion,
                title: "The GFADEX metadata package should be the latest version.",
                instruction: "A new version of the GFADEX metadata package is available. You should import the latest version of the GFADEX metadata package to the datastore. Follow the instructions provided in the GF ADEx Flow app \"Update\" section.",
                headers: &["Remote version", "Local version"],
            },
            Self::AppVersion => &RuleDefinition {
                key: Self::AppVersion,
                title: "The GFADEX app should be the latest version.",
                instruction: "A new version of the GFADEX app is available. You should update the GFADEX app to the latest version. The ADEx Flow app is available in the DHIS2 App Hub. Open the App Management app and search for \"ADEx Flow\" to install the latest version.",
                headers: &["Remote version", "Local version"],
            },
            Self::SingleImplementerType => &RuleDefinition {
                key: Self::SingleImplementerType,
                title: "All GFADEX indicators which are configured should be attributed to a single implementer type.",
                instruction: "Review the indicators listed below and ensure that they are all attributed to a single implementer type.",
                headers: &["Implementer type", "Count of indicators"],
            },
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single display value in a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(i64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&String> for Cell {
    fn from(value: &String) -> Self {
        Cell::Text(value.clone())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// One row of a rule's findings table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Finding {
    cells: Vec<Cell>,
}

impl Finding {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells rendered as display strings.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(ToString::to_string).collect()
    }
}

/// Build a [`Finding`] from display values.
#[macro_export]
macro_rules! finding {
    ($($cell:expr),+ $(,)?) => {
        $crate::catalog::Finding::new(vec![$($crate::catalog::Cell::from($cell)),+])
    };
}

/// Findings recorded for one rule during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub key: RuleKey,
    pub findings: Vec<Finding>,
}

impl RuleResult {
    pub fn definition(&self) -> &'static RuleDefinition {
        self.key.definition()
    }

    pub fn title(&self) -> &'static str {
        self.definition().title
    }

    pub fn instruction(&self) -> &'static str {
        self.definition().instruction
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.definition().headers
    }

    pub fn count(&self) -> usize {
        self.findings.len()
    }

    pub fn is_ok(&self) -> bool {
        self.findings.is_empty()
    }

    /// Summary label: "OK", "1 issue" or "N issues".
    pub fn status_label(&self) -> String {
        match self.count() {
            0 => "OK".to_string(),
            1 => "1 issue".to_string(),
            n => format!("{n} issues"),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RunStatus {
    /// Every applicable rule ran.
    Completed,
    /// The reference package lacks required keys; only that finding is reported.
    ShortCircuited { missing_keys: Vec<String> },
}

/// The populated rule catalog of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: RunStatus,
    /// One entry per rule, in canonical order.
    pub results: Vec<RuleResult>,
}

impl ValidationReport {
    /// A report with every rule present and no findings.
    pub fn empty() -> Self {
        Self {
            status: RunStatus::Completed,
            results: RuleKey::ALL
                .into_iter()
                .map(|key| RuleResult {
                    key,
                    findings: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn result(&self, key: RuleKey) -> Option<&RuleResult> {
        self.results.iter().find(|result| result.key == key)
    }

    /// Findings of one rule; empty when the rule recorded nothing.
    pub fn findings(&self, key: RuleKey) -> &[Finding] {
        self.result(key)
            .map(|result| result.findings.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn record(&mut self, key: RuleKey, findings: Vec<Finding>) {
        if let Some(result) = self.results.iter_mut().find(|result| result.key == key) {
            result.findings.extend(findings);
        }
    }

    pub fn total_findings(&self) -> usize {
        self.results.iter().map(RuleResult::count).sum()
    }

    pub fn has_findings(&self) -> bool {
        self.total_findings() > 0
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Rules with at least one finding, in canonical order.
    pub fn with_findings(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|result| !result.is_ok())
    }

    /// All rules sorted ascending by finding count; ties keep catalog order.
    pub fn summary_order(&self) -> Vec<&RuleResult> {
        let mut ordered: Vec<&RuleResult> = self.results.iter().collect();
        ordered.sort_by_key(|result| result.count());
        ordered
    }
}
