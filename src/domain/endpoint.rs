use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::ValidationError;

/// Private-network address used until the user configures one.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.1.100:5000/";

/// Base URL of the host, always absolute http(s) with a trailing slash.
///
/// Relative routes such as `command` or `status` are joined onto it, so the
/// trailing slash keeps any path prefix (`http://host/jarvis/`) intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(Url);

impl Endpoint {
    /// Validate and normalize user input.
    ///
    /// Whitespace is trimmed, a missing scheme becomes `http://`, query and
    /// fragment are dropped and the path gets a trailing `/`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Blank);
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let invalid = |reason: String| ValidationError::Invalid {
            input: trimmed.to_string(),
            reason,
        };

        let mut url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Resolve a route relative to this endpoint.
    pub fn join(&self, route: &str) -> Result<Url, ValidationError> {
        self.0
            .join(route.trim_start_matches('/'))
            .map_err(|e| ValidationError::Invalid {
                input: route.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Endpoint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0.into()
    }
}
