//! Offline exports: one JSON document per resource in a directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::source::{Resource, SnapshotSource};

/// Reads snapshot documents from `<dir>/<resource file name>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.root.join(resource.file_name())
    }
}

impl SnapshotSource for DirectorySource {
    fn fetch(&self, resource: Resource) -> Result<Option<Value>> {
        let path = self.path_for(resource);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if resource.is_optional() {
                    debug!(path = %path.display(), "Optional snapshot file absent");
                    return Ok(None);
                }
                return Err(FetchError::NotFound {
                    resource: path.display().to_string(),
                });
            }
            Err(source) => return Err(FetchError::Io { path, source }),
        };
        let value = serde_json::from_str(&text).map_err(|source| FetchError::Json {
            resource: path.display().to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
