use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::config::RemoteConfig;
use crate::domain::{DomainError, Endpoint, TransportError};
use crate::ports::{Method, Transport};

/// reqwest-backed transport to the host.
///
/// The endpoint can be swapped while requests are in flight; each request
/// reads the latest value once, when it starts.
pub struct ReqwestTransport {
    client: Client,
    endpoint: RwLock<Endpoint>,
}

impl ReqwestTransport {
    /// Create a transport using the timeouts from the remote configuration.
    pub fn from_config(endpoint: Endpoint, config: &RemoteConfig) -> Result<Self, DomainError> {
        Self::new(endpoint, config.connect_timeout(), config.request_timeout())
    }

    pub fn new(
        endpoint: Endpoint,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, DomainError> {
        // The host lives on the local network, so system proxies are bypassed
        let client = Client::builder()
            .use_rustls_tls()
            .no_proxy()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(format!("JarvisMobile/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpClient(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            endpoint = %endpoint,
            connect_timeout_ms = connect_timeout.as_millis() as u64,
            request_timeout_ms = request_timeout.as_millis() as u64,
            "Transport initialized"
        );

        Ok(Self {
            client,
            endpoint: RwLock::new(endpoint),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        route: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = self
            .endpoint
            .read()
            .join(route)
            .map_err(|e| TransportError::Unknown(e.to_string()))?;

        debug!(method = ?method, url = %url, "Sending request");

        let builder = match method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
        };
        let builder = match body {
            Some(body) => builder.json(&body),
            None => builder,
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(classify)?;

        if !status.is_success() {
            let diagnostic = http_failure(status, &bytes);
            warn!(url = %url, status = status.as_u16(), "Host returned an error status");
            return Err(TransportError::Unknown(diagnostic));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "Response body is not JSON");
            TransportError::Malformed(e.to_string())
        })
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint.read().clone()
    }

    fn set_endpoint(&self, endpoint: Endpoint) {
        let mut guard = self.endpoint.write();
        if *guard != endpoint {
            info!(from = %*guard, to = %endpoint, "Transport endpoint changed");
            *guard = endpoint;
        }
    }
}

/// Map a client error onto the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    let diagnostic = describe(&err);
    if err.is_connect() || err.is_timeout() || has_io_source(&err) {
        TransportError::Unreachable(diagnostic)
    } else if err.is_decode() {
        TransportError::Malformed(diagnostic)
    } else {
        TransportError::Unknown(diagnostic)
    }
}

/// Error message followed by its source chain.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn has_io_source(err: &(dyn StdError + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Diagnostic for a non-2xx reply, including the host's own error text.
fn http_failure(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body).ok().and_then(|value| {
        ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    match detail {
        Some(detail) if !detail.is_empty() => format!("HTTP {}: {}", status, detail),
        _ => format!("HTTP {}", status),
    }
}
