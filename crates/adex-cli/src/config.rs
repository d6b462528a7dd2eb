//! The `adex-audit.toml` configuration file.
//!
//! Stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/org.theglobalfund.adex-audit/
//! - Windows: %APPDATA%/theglobalfund/adex-audit/config/
//! - Linux: ~/.config/adex-audit/

use std::fs;
use std::path::{Path, PathBuf};

use adex_fetch::{DEFAULT_APP_KEY, ReleaseUrls};
use adex_report::CsvQuoting;
use adex_validate::ValidationOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "theglobalfund";
const APP_NAME: &str = "adex-audit";
const CONFIG_FILENAME: &str = "adex-audit.toml";

/// Environment variable holding the API token unless configured otherwise.
pub const DEFAULT_TOKEN_ENV: &str = "ADEX_API_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub source: SourceConfig,
    pub validation: ValidationOptions,
    pub export: ExportConfig,
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Platform base URL, without `/api`.
    pub server: Option<String>,
    /// Name of the environment variable holding the API token.
    pub token_env: String,
    /// Directory of offline JSON exports; takes precedence over `server`.
    pub snapshot_dir: Option<PathBuf>,
    pub package_release_url: Option<String>,
    pub app_release_url: Option<String>,
    /// Key of the installed app whose version is compared.
    pub app_key: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            server: None,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            snapshot_dir: None,
            package_release_url: None,
            app_release_url: None,
            app_key: DEFAULT_APP_KEY.to_string(),
        }
    }
}

impl SourceConfig {
    pub fn release_urls(&self) -> ReleaseUrls {
        ReleaseUrls {
            package: self.package_release_url.clone(),
            app: self.app_release_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub csv_quoting: CsvQuoting,
}

/// Path of the default configuration file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load an explicitly requested configuration file. Every failure is an error.
pub fn load_config_from(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config = toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    info!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Load the configuration from the default location.
///
/// Returns defaults if:
/// - The file doesn't exist
/// - The file cannot be read or parsed
/// - The platform-specific directory cannot be determined
pub fn load_default_config() -> AuditConfig {
    let Some(path) = config_path() else {
        warn!("Could not determine configuration path, using defaults");
        return AuditConfig::default();
    };
    load_config_or_default(&path)
}

/// Lenient load used for the default location.
pub fn load_config_or_default(path: &Path) -> AuditConfig {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to parse configuration file: {}, using defaults", e);
                AuditConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No configuration file found at {:?}, using defaults", path);
            AuditConfig::default()
        }
        Err(e) => {
            warn!("Failed to read configuration file: {}, using defaults", e);
            AuditConfig::default()
        }
    }
}

/// Load from `explicit` when given, otherwise from the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<AuditConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_default_config()),
    }
}
