//! Platform Web API and release API client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::source::{Resource, SnapshotSource};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("adex-audit/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Latest-release endpoints of the two independently versioned projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseUrls {
    pub package: Option<String>,
    pub app: Option<String>,
}

/// Fetches snapshot documents from a running platform instance.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    auth: Option<HeaderValue>,
    releases: ReleaseUrls,
}

impl HttpSource {
    /// Creates a client for the server at `base_url` (without the `/api` suffix).
    ///
    /// The token is sent as `Authorization: ApiToken <token>` to the platform
    /// only, never to the release API.
    pub fn new(base_url: impl Into<String>, token: Option<&str>, releases: ReleaseUrls) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let auth = token
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("ApiToken {token}"))
                    .map_err(|e| FetchError::Client(format!("invalid API token: {e}")))?;
                value.set_sensitive(true);
                Ok::<_, FetchError>(value)
            })
            .transpose()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            auth,
            releases,
        })
    }

    /// Absolute URL of a platform API path.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn release_url(&self, resource: Resource) -> Option<&str> {
        match resource {
            Resource::PackageRelease => self.releases.package.as_deref(),
            Resource::AppRelease => self.releases.app.as_deref(),
            _ => None,
        }
    }

    fn get(&self, url: &str, authenticated: bool) -> Result<Value> {
        debug!("Fetching {}", url);
        let mut request = self.client.get(url);
        if authenticated && let Some(auth) = &self.auth {
            request = request.header(AUTHORIZATION, auth.clone());
        }
        let response = request.send().map_err(|e| FetchError::Network {
            endpoint: url.to_string(),
            message: e.to_string(),
        })?;
        handle_response(url, response)
    }
}

/// Checks the status and parses the JSON body.
fn handle_response(url: &str, response: Response) -> Result<Value> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound {
            resource: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().map_err(|e| FetchError::Network {
        endpoint: url.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&body).map_err(|source| FetchError::Json {
        resource: url.to_string(),
        source,
    })
}

impl SnapshotSource for HttpSource {
    fn fetch(&self, resource: Resource) -> Result<Option<Value>> {
        match resource.api_path() {
            Some(path) => self.get(&self.api_url(path), true).map(Some),
            None => match self.release_url(resource) {
                Some(url) => self.get(url, false).map(Some),
                None => {
                    debug!(%resource, "No release URL configured");
                    Ok(None)
                }
            },
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let source = HttpSource::new("https://dhis2.example.org/", Some("d2p_abc"), ReleaseUrls::default());
        assert!(source.is_ok());
    }

    #[test]
    fn test_api_url_joins_paths() {
        let source = HttpSource::new("https://dhis2.example.org/hmis/", None, ReleaseUrls::default())
            .expect("client");
        assert_eq!(
            source.api_url("system/info.json"),
            "https://dhis2.example.org/hmis/api/system/info.json"
        );
    }

    #[test]
    fn test_unconfigured_release_is_absent() {
        let source = HttpSource::new("https://dhis2.example.org", None, ReleaseUrls::default())
            .expect("client");
        assert!(source.fetch(Resource::AppRelease).expect("no request made").is_none());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let result = HttpSource::new("https://dhis2.example.org", Some("bad\ntoken"), ReleaseUrls::default());
        assert!(matches!(result, Err(FetchError::Client(_))));
    }
}
