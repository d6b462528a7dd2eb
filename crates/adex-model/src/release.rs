//! Release descriptors published by a release API.

use serde::{Deserialize, Serialize};

/// The latest published release of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    /// The release tag name (e.g., "v1.4.0").
    pub tag_name: String,

    /// The release title.
    #[serde(default)]
    pub name: Option<String>,

    /// HTML URL to the release page.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
}

impl ReleaseDescriptor {
    /// Returns the tag without the "v" prefix if present.
    #[must_use]
    pub fn version(&self) -> &str {
        self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_strips_prefix() {
        let release = ReleaseDescriptor {
            tag_name: "v1.4.0".to_string(),
            ..ReleaseDescriptor::default()
        };
        assert_eq!(release.version(), "1.4.0");
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let release: ReleaseDescriptor = serde_json::from_str(
            r#"{"tag_name": "2.0.1", "draft": false, "prerelease": false, "assets": []}"#,
        )
        .unwrap();
        assert_eq!(release.version(), "2.0.1");
    }
}
