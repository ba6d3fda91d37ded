use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::protocol::{routes, StatusResponse};
use crate::domain::HostStatus;
use crate::ports::http::get_json;
use crate::ports::Transport;

/// Reduces a status request to host reachability. Fails closed.
pub struct ConnectivityMonitor {
    transport: Arc<dyn Transport>,
}

impl ConnectivityMonitor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// True only when the host answers with `status: "online"`.
    ///
    /// Only `status` is read; other fields of the reply are not decoded.
    pub async fn check_status(&self) -> bool {
        let reply = get_json::<_, StatusResponse>(self.transport.as_ref(), routes::STATUS).await;
        let online = match reply {
            Ok(reply) => reply.is_online(),
            Err(e) => {
                debug!(kind = e.kind(), error = %e, "Status request failed");
                false
            }
        };
        info!(endpoint = %self.transport.endpoint(), online, "Connectivity checked");
        online
    }

    /// Parsed status body, or `None` on any transport or decode failure.
    pub async fn probe(&self) -> Option<HostStatus> {
        match get_json::<_, HostStatus>(self.transport.as_ref(), routes::STATUS).await {
            Ok(status) => Some(status),
            Err(e) => {
                debug!(kind = e.kind(), error = %e, "Status request failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ReqwestTransport;
    use crate::domain::TransportError;
    use crate::testing::{closed_endpoint, spawn_host, ScriptedTransport};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::time::Duration;

    async fn check(reply: Result<serde_json::Value, TransportError>) -> bool {
        let transport = ScriptedTransport::new();
        transport.reply(reply);
        ConnectivityMonitor::new(transport).check_status().await
    }

    #[tokio::test]
    async fn test_online_is_reachable() {
        assert!(check(Ok(json!({ "status": "online" }))).await);
    }

    #[tokio::test]
    async fn test_extra_status_fields_do_not_matter() {
        assert!(check(Ok(json!({ "status": "online", "jarvis_name": "JARVIS" }))).await);
    }

    #[tokio::test]
    async fn test_mistyped_detail_fields_do_not_matter() {
        assert!(check(Ok(json!({ "status": "online", "version": 1.0 }))).await);
        assert!(check(Ok(json!({ "status": "online", "features": null }))).await);
        assert!(check(Ok(json!({ "status": "online", "features": { "typing": 1 } }))).await);
        assert!(check(Ok(json!({ "status": "online", "jarvis_name": 42 }))).await);
    }

    #[tokio::test]
    async fn test_probe_tolerates_mistyped_details() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({ "status": "online", "version": 1.0 })));

        let status = ConnectivityMonitor::new(transport).probe().await.unwrap();
        assert!(status.is_online());
        assert_eq!(status.version, None);
    }

    #[tokio::test]
    async fn test_every_other_outcome_is_unreachable() {
        assert!(!check(Ok(json!({ "status": "offline" }))).await);
        assert!(!check(Ok(json!({ "status": "ONLINE" }))).await);
        assert!(!check(Ok(json!({ "state": "online" }))).await);
        assert!(!check(Ok(json!("online"))).await);
        assert!(!check(Err(TransportError::Unreachable("timed out".to_string()))).await);
        assert!(!check(Err(TransportError::Malformed("eof".to_string()))).await);
        assert!(!check(Err(TransportError::Unknown("HTTP 500".to_string()))).await);
    }

    #[tokio::test]
    async fn test_probe_returns_host_details() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({
            "status": "online",
            "jarvis_name": "JARVIS",
            "version": "1.0.0",
            "features": { "typing": true }
        })));

        let status = ConnectivityMonitor::new(transport).probe().await.unwrap();
        assert_eq!(status.jarvis_name.as_deref(), Some("JARVIS"));
        assert_eq!(status.version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn test_real_transport_fails_closed() {
        let app = Router::new().route("/status", get(|| async { "not json" }));
        let garbage = spawn_host(app).await;
        let closed = closed_endpoint().await;

        for endpoint in [garbage, closed] {
            let transport =
                ReqwestTransport::new(endpoint, Duration::from_secs(1), Duration::from_secs(1))
                    .unwrap();
            assert!(!ConnectivityMonitor::new(Arc::new(transport)).check_status().await);
        }
    }

    #[tokio::test]
    async fn test_real_transport_online() {
        let app = Router::new().route("/status", get(|| async { Json(json!({ "status": "online" })) }));
        let transport = ReqwestTransport::new(
            spawn_host(app).await,
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(ConnectivityMonitor::new(Arc::new(transport)).check_status().await);
    }
}
