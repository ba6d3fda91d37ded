//! Test doubles shared by the unit tests: an in-process fake host and a
//! scripted transport.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;

use crate::domain::{Endpoint, TransportError};
use crate::ports::{Method, Transport};

/// Serve `app` on an ephemeral local port and return its endpoint.
pub async fn spawn_host(app: Router) -> Endpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake host");
    let addr = listener.local_addr().expect("fake host address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Endpoint::parse(&format!("http://{addr}")).expect("fake host endpoint")
}

/// Endpoint on a local port nothing listens on.
pub async fn closed_endpoint() -> Endpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    Endpoint::parse(&format!("http://{addr}")).expect("closed endpoint")
}

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub route: String,
    pub body: Option<Value>,
}

/// Transport that replays queued replies and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    endpoint: Mutex<Endpoint>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, reply: Result<Value, TransportError>) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        route: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.requests.lock().push(RecordedRequest {
            method,
            route: route.to_string(),
            body,
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unknown("no scripted reply".to_string())))
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint.lock().clone()
    }

    fn set_endpoint(&self, endpoint: Endpoint) {
        *self.endpoint.lock() = endpoint;
    }
}
