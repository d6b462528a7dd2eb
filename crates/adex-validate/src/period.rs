//! Period token classification.
//!
//! A period token is either relative to "now" (`LAST_MONTH`), a fixed
//! calendar period (`202401`, `2024Q1`, `2024`), or unsupported.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Relative monthly period tokens.
pub const RELATIVE_MONTHS: &[&str] = &[
    "THIS_MONTH",
    "LAST_MONTH",
    "MONTHS_THIS_YEAR",
    "MONTHS_LAST_YEAR",
    "LAST_12_MONTHS",
];

/// Relative quarterly period tokens.
pub const RELATIVE_QUARTERS: &[&str] = &[
    "THIS_QUARTER",
    "LAST_QUARTER",
    "QUARTERS_THIS_YEAR",
    "QUARTERS_LAST_YEAR",
    "LAST_4_QUARTERS",
];

/// Relative yearly period tokens.
pub const RELATIVE_YEARS: &[&str] = &["LAST_YEAR", "THIS_YEAR"];

/// Monthly periods from 2020 to 2039.
static FIXED_MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^20[2-3][0-9][0-1][0-9]$").expect("Invalid month regex"));

/// Quarterly periods in the 2020s.
static FIXED_QUARTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^202[0-9]Q[1-4]$").expect("Invalid quarter regex"));

/// Yearly periods in the 2020s.
static FIXED_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^202[0-9]$").expect("Invalid year regex"));

/// Supported reporting periodicities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Periodicity {
    Monthly,
    Quarterly,
    Yearly,
}

impl Periodicity {
    /// All periodicities in bucket comparison order.
    pub const fn all() -> &'static [Self] {
        &[Self::Monthly, Self::Quarterly, Self::Yearly]
    }

    /// Upper-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Relative tokens of this periodicity.
    pub fn relative_tokens(&self) -> &'static [&'static str] {
        match self {
            Self::Monthly => RELATIVE_MONTHS,
            Self::Quarterly => RELATIVE_QUARTERS,
            Self::Yearly => RELATIVE_YEARS,
        }
    }

    fn fixed_pattern(&self) -> &'static Regex {
        match self {
            Self::Monthly => &FIXED_MONTH_REGEX,
            Self::Quarterly => &FIXED_QUARTER_REGEX,
            Self::Yearly => &FIXED_YEAR_REGEX,
        }
    }
}

/// Whether a token is relative, fixed, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodKind {
    Relative,
    Fixed,
    Unknown,
}

/// Classification of a single period token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodClass {
    Relative(Periodicity),
    Fixed(Periodicity),
    Unknown,
}

impl PeriodClass {
    pub fn kind(&self) -> PeriodKind {
        match self {
            Self::Relative(_) => PeriodKind::Relative,
            Self::Fixed(_) => PeriodKind::Fixed,
            Self::Unknown => PeriodKind::Unknown,
        }
    }

    /// Periodicity, or `None` for unknown tokens.
    pub fn periodicity(&self) -> Option<Periodicity> {
        match self {
            Self::Relative(p) | Self::Fixed(p) => Some(*p),
            Self::Unknown => None,
        }
    }
}

/// Combined periodicity of a list of period tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodType {
    /// At least one token is unsupported.
    Unknown,
    /// Tokens span more than one periodicity.
    Mixed,
    Single(Periodicity),
}

impl PeriodType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Mixed => "MIXED",
            Self::Single(periodicity) => periodicity.label(),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one period token. Relative tokens are checked before fixed patterns.
pub fn classify(period: &str) -> PeriodClass {
    for periodicity in Periodicity::all() {
        if periodicity.relative_tokens().iter().any(|token| *token == period) {
            return PeriodClass::Relative(*periodicity);
        }
    }
    for periodicity in Periodicity::all() {
        if periodicity.fixed_pattern().is_match(period) {
            return PeriodClass::Fixed(*periodicity);
        }
    }
    PeriodClass::Unknown
}

/// Classify a list of period tokens: unknown dominates, then mixed, then the single periodicity.
///
/// An empty list is unknown.
pub fn classify_mixed<S: AsRef<str>>(periods: &[S]) -> PeriodType {
    let mut seen = BTreeSet::new();
    for period in periods {
        match classify(period.as_ref()).periodicity() {
            Some(periodicity) => {
                seen.insert(periodicity);
            }
            None => return PeriodType::Unknown,
        }
    }
    let mut distinct = seen.into_iter();
    match (distinct.next(), distinct.next()) {
        (Some(only), None) => PeriodType::Single(only),
        (Some(_), Some(_)) => PeriodType::Mixed,
        (None, _) => PeriodType::Unknown,
    }
}

/// Whether the token is one of the relative period tokens.
pub fn is_relative(period: &str) -> bool {
    matches!(classify(period), PeriodClass::Relative(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_tokens() {
        assert_eq!(classify("LAST_MONTH"), PeriodClass::Relative(Periodicity::Monthly));
        assert_eq!(classify("THIS_QUARTER"), PeriodClass::Relative(Periodicity::Quarterly));
        assert_eq!(classify("LAST_YEAR"), PeriodClass::Relative(Periodicity::Yearly));
        assert_eq!(classify("LAST_4_QUARTERS").kind(), PeriodKind::Relative);
    }

    #[test]
    fn test_fixed_tokens() {
        assert_eq!(classify("202401"), PeriodClass::Fixed(Periodicity::Monthly));
        assert_eq!(classify("203912"), PeriodClass::Fixed(Periodicity::Monthly));
        assert_eq!(classify("2024Q3"), PeriodClass::Fixed(Periodicity::Quarterly));
        assert_eq!(classify("2029"), PeriodClass::Fixed(Periodicity::Yearly));
    }

    #[test]
    fn test_out_of_range_tokens_are_unknown() {
        assert_eq!(classify("201912"), PeriodClass::Unknown);
        assert_eq!(classify("2030"), PeriodClass::Unknown);
        assert_eq!(classify("2024Q5"), PeriodClass::Unknown);
        assert_eq!(classify("2024Q1X"), PeriodClass::Unknown);
        assert_eq!(classify("2024W01"), PeriodClass::Unknown);
        assert_eq!(classify("last_month"), PeriodClass::Unknown);
        assert_eq!(classify(""), PeriodClass::Unknown);
    }

    #[test]
    fn test_classify_mixed_precedence() {
        assert_eq!(classify_mixed(&["LAST_MONTH", "202401"]), PeriodType::Single(Periodicity::Monthly));
        assert_eq!(classify_mixed(&["LAST_MONTH", "2024Q1"]), PeriodType::Mixed);
        assert_eq!(classify_mixed(&["LAST_MONTH", "2024Q1", "bogus"]), PeriodType::Unknown);
        assert_eq!(classify_mixed::<&str>(&[]), PeriodType::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PeriodType::Single(Periodicity::Quarterly).to_string(), "QUARTERLY");
        assert_eq!(PeriodType::Mixed.label(), "MIXED");
        assert_eq!(PeriodType::Unknown.label(), "UNKNOWN");
    }

    #[test]
    fn test_is_relative() {
        assert!(is_relative("LAST_12_MONTHS"));
        assert!(!is_relative("2024"));
    }
}
