use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::protocol::{
    routes, AskRequest, AskResponse, CommandRequest, ServerResponse, TypeRequest,
};
use crate::domain::{Mode, Outcome, TransportError};
use crate::ports::http::post_json;
use crate::ports::Transport;

/// Shown for every request that could not reach the host.
pub const UNREACHABLE_MESSAGE: &str = "Can't reach PC. Check connection.";

/// Turns user text into host requests and every reply into an [`Outcome`].
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Run the operation that `mode` selects.
    pub async fn dispatch(&self, mode: Mode, text: &str) -> Outcome {
        match mode {
            Mode::Control => self.send_command(text).await,
            Mode::Type => self.send_type_text(text).await,
        }
    }

    /// Send a semantic command. The host's message is relayed verbatim.
    ///
    /// `text` must already be trimmed and non-empty.
    pub async fn send_command(&self, text: &str) -> Outcome {
        info!(chars = text.chars().count(), "Sending command");

        let request = CommandRequest {
            text: text.to_string(),
        };
        let reply: Result<ServerResponse, _> =
            post_json(self.transport.as_ref(), routes::COMMAND, &request).await;

        match reply {
            Ok(response) if response.success => {
                info!(action = ?response.action, "Command accepted");
                Outcome::Success(response.message)
            }
            Ok(response) => rejected(routes::COMMAND, response.rejection_message()),
            Err(e) => failed(routes::COMMAND, &e, "Something went wrong"),
        }
    }

    /// Send text to be typed on the host.
    ///
    /// On success the confirmation is built from the character count of
    /// `text`; the host's own message is not shown.
    pub async fn send_type_text(&self, text: &str) -> Outcome {
        let chars = text.chars().count();
        info!(chars, "Sending text to type");

        let request = TypeRequest {
            text: text.to_string(),
        };
        let reply: Result<ServerResponse, _> =
            post_json(self.transport.as_ref(), routes::TYPE, &request).await;

        match reply {
            Ok(response) if response.success => Outcome::Success(typed_message(chars)),
            Ok(response) => rejected(routes::TYPE, response.rejection_message()),
            Err(e) => failed(routes::TYPE, &e, "Failed to type"),
        }
    }

    /// Ask the host's assistant a question and relay its answer.
    pub async fn ask(&self, message: &str) -> Outcome {
        info!(chars = message.chars().count(), "Sending question");

        let request = AskRequest {
            message: message.to_string(),
        };
        let reply: Result<AskResponse, _> =
            post_json(self.transport.as_ref(), routes::ASK, &request).await;

        match reply {
            Ok(response) if response.success => Outcome::Success(response.response),
            Ok(response) => {
                let reason = response.error.unwrap_or(response.response);
                rejected(routes::ASK, &reason)
            }
            Err(e) => failed(routes::ASK, &e, "Failed to ask"),
        }
    }
}

pub fn typed_message(chars: usize) -> String {
    format!("Typed {} chars!", chars)
}

fn rejected(route: &str, message: &str) -> Outcome {
    warn!(route, message, "Host rejected request");
    Outcome::Error(message.to_string())
}

fn failed(route: &str, err: &TransportError, prefix: &str) -> Outcome {
    match err {
        TransportError::Unreachable(diagnostic) => {
            warn!(route, error = %diagnostic, "Host unreachable");
            Outcome::Error(UNREACHABLE_MESSAGE.to_string())
        }
        TransportError::Malformed(_) | TransportError::Unknown(_) => {
            error!(route, kind = err.kind(), error = %err, "Request failed");
            Outcome::Error(format!("{}: {}", prefix, err.diagnostic()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Method;
    use crate::testing::{closed_endpoint, spawn_host, ScriptedTransport};
    use crate::adapters::ReqwestTransport;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn dispatcher(transport: &Arc<ScriptedTransport>) -> Dispatcher {
        Dispatcher::new(transport.clone())
    }

    #[tokio::test]
    async fn test_command_success_relays_host_message() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({ "success": true, "message": "Opening Chrome" })));

        let outcome = dispatcher(&transport).send_command("open chrome").await;

        assert_eq!(outcome, Outcome::Success("Opening Chrome".to_string()));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].route, "command");
        assert_eq!(requests[0].body, Some(json!({ "command": "open chrome" })));
    }

    #[tokio::test]
    async fn test_command_rejection_relays_message_verbatim() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({ "success": false, "message": "No app named 'foo'" })));

        let outcome = dispatcher(&transport).send_command("open foo").await;
        assert_eq!(outcome, Outcome::Error("No app named 'foo'".to_string()));
    }

    #[tokio::test]
    async fn test_type_success_reports_char_count_not_host_message() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({ "success": true, "message": "whatever the host says" })));

        let outcome = dispatcher(&transport).send_type_text("hello").await;

        assert_eq!(outcome, Outcome::Success("Typed 5 chars!".to_string()));
        assert_eq!(transport.requests()[0].route, "type");
        assert_eq!(transport.requests()[0].body, Some(json!({ "text": "hello" })));
    }

    #[tokio::test]
    async fn test_type_counts_characters_not_bytes() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({ "success": true, "message": "" })));

        let outcome = dispatcher(&transport).send_type_text("héllo wörld").await;
        assert_eq!(outcome, Outcome::Success("Typed 11 chars!".to_string()));
    }

    #[tokio::test]
    async fn test_type_rejection_relays_message() {
        let transport = ScriptedTransport::new();
        transport.reply(Ok(json!({
            "success": false,
            "message": "Remote typing is disabled in settings."
        })));

        let outcome = dispatcher(&transport).send_type_text("hello").await;
        assert_eq!(
            outcome,
            Outcome::Error("Remote typing is disabled in settings.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_message_is_fixed_for_both_operations() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Err(TransportError::Unreachable("connection refused".to_string())))
            .reply(Err(TransportError::Unreachable("operation timed out".to_string())));
        let dispatcher = dispatcher(&transport);

        let command = dispatcher.send_command("open chrome").await;
        let typed = dispatcher.send_type_text("hello").await;

        assert_eq!(command, Outcome::Error(UNREACHABLE_MESSAGE.to_string()));
        assert_eq!(command, typed);
        assert!(!command.message().contains("refused"));
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_embed_diagnostic() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Ok(json!({ "unexpected": true })))
            .reply(Err(TransportError::Unknown("HTTP 500 Internal Server Error".to_string())));
        let dispatcher = dispatcher(&transport);

        let command = dispatcher.send_command("open chrome").await;
        match command {
            Outcome::Error(message) => {
                assert!(message.starts_with("Something went wrong: "), "{}", message);
                assert!(message.contains("success"), "{}", message);
            }
            other => panic!("expected error, got {:?}", other),
        }

        let typed = dispatcher.send_type_text("hello").await;
        assert_eq!(
            typed,
            Outcome::Error("Failed to type: HTTP 500 Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_dispatch_follows_mode() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Ok(json!({ "success": true, "message": "ok" })))
            .reply(Ok(json!({ "success": true, "message": "ok" })));
        let dispatcher = dispatcher(&transport);

        dispatcher.dispatch(Mode::Control, "lock screen").await;
        dispatcher.dispatch(Mode::Type, "lock screen").await;

        let routes: Vec<String> = transport.requests().into_iter().map(|r| r.route).collect();
        assert_eq!(routes, vec!["command", "type"]);
    }

    #[tokio::test]
    async fn test_ask_relays_response_and_error() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Ok(json!({ "success": true, "response": "It is sunny.", "action": "chat" })))
            .reply(Ok(json!({ "success": false, "error": "AI engine offline" })));
        let dispatcher = dispatcher(&transport);

        assert_eq!(
            dispatcher.ask("weather?").await,
            Outcome::Success("It is sunny.".to_string())
        );
        assert_eq!(
            dispatcher.ask("weather?").await,
            Outcome::Error("AI engine offline".to_string())
        );
        assert_eq!(transport.requests()[0].body, Some(json!({ "message": "weather?" })));
    }

    #[tokio::test]
    async fn test_end_to_end_against_fake_host() {
        let app = Router::new()
            .route(
                "/command",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "success": true,
                        "action": "app_launch",
                        "message": format!("Ran {}", body["command"].as_str().unwrap_or_default())
                    }))
                }),
            )
            .route(
                "/type",
                post(|| async { Json(json!({ "success": true, "message": "Typed 2 characters!" })) }),
            );
        let endpoint = spawn_host(app).await;
        let transport =
            ReqwestTransport::new(endpoint, Duration::from_secs(2), Duration::from_secs(2)).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));

        assert_eq!(
            dispatcher.send_command("open chrome").await,
            Outcome::Success("Ran open chrome".to_string())
        );
        assert_eq!(
            dispatcher.send_type_text("hey there").await,
            Outcome::Success("Typed 9 chars!".to_string())
        );
    }

    #[tokio::test]
    async fn test_end_to_end_unreachable_host() {
        let transport = ReqwestTransport::new(
            closed_endpoint().await,
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
        .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));

        assert_eq!(
            dispatcher.send_command("open chrome").await,
            Outcome::Error(UNREACHABLE_MESSAGE.to_string())
        );
        assert_eq!(
            dispatcher.send_type_text("hello").await,
            Outcome::Error(UNREACHABLE_MESSAGE.to_string())
        );
    }
}
