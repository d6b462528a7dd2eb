//! Fixed reference tables used by the rules.

use serde::{Deserialize, Serialize};

/// ISO-3166 alpha-3 codes of countries eligible for the program.
pub const ISO3_CODES: [&str; 109] = [
    "AFG", "ALB", "AGO", "ARM", "AZE", "BGD", "BLR", "BLZ", "BEN", "BTN", "BOL", "BWA", "BFA",
    "BDI", "CPV", "KHM", "CMR", "CAF", "TCD", "COL", "COM", "COG", "COD", "CRI", "CIV", "CUB",
    "DJI", "DOM", "ECU", "EGY", "SLV", "ERI", "SWZ", "ETH", "FJI", "GAB", "GMB", "GEO", "GHA",
    "GTM", "GIN", "GNB", "GUY", "HTI", "HND", "IND", "IDN", "IRN", "JAM", "KAZ", "KEN", "PRK",
    "XXK", "KGZ", "LAO", "LSO", "LBR", "MDG", "MWI", "MYS", "MLI", "MRT", "MUS", "MDA", "MNG",
    "MNE", "MAR", "MOZ", "MMR", "NAM", "NPL", "NIC", "NER", "NGA", "PAK", "PNG", "PRY", "PER",
    "PHL", "RUS", "RWA", "STP", "SEN", "SRB", "SLE", "SLB", "SOM", "ZAF", "SSD", "LKA", "SDN",
    "SUR", "TJK", "TZA", "THA", "TLS", "TGO", "TUN", "TKM", "UGA", "UKR", "UZB", "VUT", "VEN",
    "VNM", "YEM", "ZMB", "XZB", "ZWE",
];

/// Whether the code is an eligible ISO-3166 alpha-3 code.
pub fn is_iso3_code(code: &str) -> bool {
    ISO3_CODES.iter().any(|iso3| *iso3 == code)
}

/// Fine age-band disaggregation options.
const FINE_AGE_BANDS: &[&str] = &[
    "RPseIh0fIIb",
    "zbsxVMPLP1M",
    "X7SDej47sb9",
    "sF8NGOqMeDj",
    "SGjUYxKpJa1",
    "oJ1VU54aHQb",
];

/// Coarse age-band disaggregation options overlapping the fine ones.
const COARSE_AGE_BANDS: &[&str] = &["SSYyE93vzp1", "kLmUIk88rZn", "qzta2Ue73Mx"];

/// Two sets of disaggregation options that must not both be submitted for one data element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBandRule {
    /// Data element fragment looked up in indicator codes.
    pub data_element: &'static str,
    pub left_side: &'static [&'static str],
    pub right_side: &'static [&'static str],
}

/// Data elements whose category combos mix overlapping age bands.
pub const AGE_BAND_RULES: &[AgeBandRule] = &[
    AgeBandRule {
        data_element: "kJqLw03R9Ed",
        left_side: FINE_AGE_BANDS,
        right_side: COARSE_AGE_BANDS,
    },
    AgeBandRule {
        data_element: "zahS139rbsw",
        left_side: FINE_AGE_BANDS,
        right_side: COARSE_AGE_BANDS,
    },
];

/// An allowed implementer type (attribute option combination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementerType {
    pub id: String,
    pub name: String,
}

/// Allow-list of implementer types with name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementerTypes(Vec<ImplementerType>);

impl ImplementerTypes {
    pub fn new(types: Vec<ImplementerType>) -> Self {
        Self(types)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|t| t.id == id)
    }

    /// Readable name for an implementer type id, falling back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|t| t.id == id)
            .map_or(id, |t| t.name.as_str())
    }
}
