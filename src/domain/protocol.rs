use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Host routes, relative to the configured endpoint.
pub mod routes {
    pub const COMMAND: &str = "command";
    pub const TYPE: &str = "type";
    pub const STATUS: &str = "status";
    pub const ASK: &str = "ask";
}

/// Status value the host reports when it accepts requests.
pub const STATUS_ONLINE: &str = "online";

/// Body of `POST command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(rename = "command")]
    pub text: String,
}

/// Body of `POST type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRequest {
    pub text: String,
}

/// Body of `POST ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Reply of the `command` and `type` routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// What the host did, e.g. `app_launch` or `type_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Set instead of `message` when the host rejects the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerResponse {
    /// Message to show when the host reports `success: false`.
    pub fn rejection_message(&self) -> &str {
        match (&self.error, self.message.is_empty()) {
            (Some(error), true) => error,
            _ => &self.message,
        }
    }
}

/// Reply of the `ask` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub success: bool,
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The part of the `status` reply that decides reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn is_online(&self) -> bool {
        self.status == STATUS_ONLINE
    }
}

/// Full reply of the `status` route, for display.
///
/// Detail fields with an unexpected type read as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatus {
    pub status: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub jarvis_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub features: BTreeMap<String, bool>,
}

impl HostStatus {
    pub fn is_online(&self) -> bool {
        self.status == STATUS_ONLINE
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
