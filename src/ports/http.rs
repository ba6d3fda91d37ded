use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Endpoint, TransportError};

/// HTTP verb used by a host route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Transport port for all requests against the host.
///
/// Implementations hold the current endpoint, execute one request per call
/// and classify every failure. No raw client error escapes this boundary.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a request against `route`, relative to the current endpoint,
    /// and return the JSON body of a successful response.
    async fn request(
        &self,
        method: Method,
        route: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;

    /// Endpoint that requests are currently sent to.
    fn endpoint(&self) -> Endpoint;

    /// Point subsequent requests at a new endpoint.
    fn set_endpoint(&self, endpoint: Endpoint);
}

/// Decode a response body into its wire type.
///
/// Any shape mismatch is classified as `Malformed`.
pub fn decode<R: DeserializeOwned>(value: Value) -> Result<R, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::Malformed(e.to_string()))
}

/// Perform a GET request and deserialize the response.
pub async fn get_json<T, R>(transport: &T, route: &str) -> Result<R, TransportError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let value = transport.request(Method::Get, route, None).await?;
    decode(value)
}

/// Perform a POST request with a JSON body and deserialize the response.
pub async fn post_json<T, B, R>(transport: &T, route: &str, body: &B) -> Result<R, TransportError>
where
    T: Transport + ?Sized,
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(|e| TransportError::Unknown(e.to_string()))?;
    let value = transport.request(Method::Post, route, Some(body)).await?;
    decode(value)
}
