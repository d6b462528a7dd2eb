//! Semantic versioning support for release comparisons.
//!
//! Handles version strings from release tags and the data store (e.g., "v1.4.0",
//! "2.0.0-rc.1+build.7"). Build metadata is accepted but ignored, so two versions
//! differing only in build metadata compare equal.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};

/// One dot-separated pre-release identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Numeric identifier (e.g., "1" in "beta.1").
    Numeric(u64),
    /// Alphanumeric identifier (e.g., "beta").
    AlphaNumeric(String),
}

impl Identifier {
    fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return None;
            }
            s.parse().ok().map(Identifier::Numeric)
        } else {
            Some(Identifier::AlphaNumeric(s.to_string()))
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

/// A semantic version with optional pre-release identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Version {
    /// Major version number.
    pub major: u64,
    /// Minor version number.
    pub minor: u64,
    /// Patch version number.
    pub patch: u64,
    /// Pre-release identifiers; empty for stable releases.
    pub pre_release: Vec<Identifier>,
}

fn parse_core_number(part: &str, original: &str) -> Result<u64> {
    let invalid = || ValidationError::InvalidVersion(original.to_string());
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(invalid());
    }
    part.parse().map_err(|_| invalid())
}

impl FromStr for Version {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let original = s;
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);

        // Build metadata is ignored
        let s = match s.split_once('+') {
            Some((version, build)) => {
                let malformed = build.split('.').any(|id| {
                    id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                });
                if malformed {
                    return Err(ValidationError::InvalidVersion(original.to_string()));
                }
                version
            }
            None => s,
        };

        let (version_part, pre_release) = match s.split_once('-') {
            Some((version, pre)) => {
                let identifiers = pre
                    .split('.')
                    .map(Identifier::parse)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| ValidationError::InvalidVersion(original.to_string()))?;
                (version, identifiers)
            }
            None => (s, Vec::new()),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() != 3 {
            return Err(ValidationError::InvalidVersion(original.to_string()));
        }

        Ok(Self {
            major: parse_core_number(parts[0], original)?,
            minor: parse_core_number(parts[1], original)?,
            patch: parse_core_number(parts[2], original)?,
            pre_release,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (index, identifier) in self.pre_release.iter().enumerate() {
            let separator = if index == 0 { '-' } else { '.' };
            write!(f, "{separator}{identifier}")?;
        }
        Ok(())
    }
}
