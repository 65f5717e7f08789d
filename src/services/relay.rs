// src/services/relay.rs
//! The chat relay: one visitor message in, one `{ "reply": ... }` out.
//!
//! Each call to [`ChatRelay::handle`] is independent. In fallback mode it
//! never leaves the process. In live mode it makes at most one upstream
//! call. Every path ends in a [`RelayResponse`], including upstream failures,
//! which are reported to the diagnostic sink and softened for the visitor.

use std::sync::Arc;

use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use super::completion::{CompletionClient, CompletionRequest, OpenAiClient, UpstreamError};
use super::diagnostics::{Diagnostic, DiagnosticSink};
use crate::{config::RelayConfig, message::{ChatReply, ChatRequest}, replies};

/// How a single relay invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Preflight,
    MethodNotAllowed,
    InvalidRequest,
    EmptyMessage,
    StaticReply,
    Relayed,
    UpstreamFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
    /// `None` only for the pre-flight answer, which has an empty body.
    pub reply: Option<ChatReply>,
    pub outcome: Outcome,
}

impl RelayResponse {
    fn reply(status: StatusCode, text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            status,
            reply: Some(ChatReply::new(text)),
            outcome,
        }
    }

    fn invalid_request() -> Self {
        Self::reply(
            StatusCode::BAD_REQUEST,
            replies::INVALID_REQUEST,
            Outcome::InvalidRequest,
        )
    }

    fn preflight() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            reply: None,
            outcome: Outcome::Preflight,
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let mut response = match self.reply {
            Some(reply) => (self.status, Json(reply)).into_response(),
            None => self.status.into_response(),
        };

        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// Whether an upstream credential is configured.
#[derive(Clone)]
pub enum RelayMode {
    Fallback,
    Live(Arc<dyn CompletionClient>),
}

#[derive(Clone)]
pub struct ChatRelay {
    config: RelayConfig,
    mode: RelayMode,
    sink: Arc<dyn DiagnosticSink>,
}

impl ChatRelay {
    pub fn new(config: RelayConfig, mode: RelayMode, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { config, mode, sink }
    }

    /// Live mode with the OpenAI client when a key is configured, fallback otherwise.
    pub fn from_config(
        config: RelayConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, UpstreamError> {
        let mode = match config.api_key.as_deref() {
            Some(key) => RelayMode::Live(Arc::new(OpenAiClient::new(&config, key)?)),
            None => RelayMode::Fallback,
        };
        Ok(Self::new(config, mode, sink))
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, RelayMode::Live(_))
    }

    pub async fn handle(&self, method: &Method, body: &[u8]) -> RelayResponse {
        if let Some(response) = Self::screen_method(method) {
            return response;
        }

        let Some(request) = ChatRequest::from_body(body) else {
            return RelayResponse::invalid_request();
        };

        let message = request.trimmed();
        if message.is_empty() {
            return RelayResponse::reply(
                StatusCode::BAD_REQUEST,
                replies::EMPTY_MESSAGE,
                Outcome::EmptyMessage,
            );
        }

        match &self.mode {
            RelayMode::Fallback => RelayResponse::reply(
                StatusCode::OK,
                replies::STATIC_FALLBACK,
                Outcome::StaticReply,
            ),
            RelayMode::Live(client) => self.relay(client.as_ref(), message).await,
        }
    }

    /// Answer a request whose body could not be read (too large, aborted).
    /// The method still decides pre-flight and 405 first.
    pub fn unreadable_body(&self, method: &Method) -> RelayResponse {
        Self::screen_method(method).unwrap_or_else(RelayResponse::invalid_request)
    }

    fn screen_method(method: &Method) -> Option<RelayResponse> {
        if method == Method::OPTIONS {
            return Some(RelayResponse::preflight());
        }
        if method != Method::POST {
            return Some(RelayResponse::reply(
                StatusCode::METHOD_NOT_ALLOWED,
                replies::METHOD_NOT_ALLOWED,
                Outcome::MethodNotAllowed,
            ));
        }
        None
    }

    async fn relay(&self, client: &dyn CompletionClient, message: &str) -> RelayResponse {
        let request = CompletionRequest::single_turn(&self.config, replies::SYSTEM_PROMPT, message);

        match client.complete(&request).await {
            Ok(text) => {
                debug!(chars = text.len(), "upstream reply received");
                RelayResponse::reply(StatusCode::OK, text.trim(), Outcome::Relayed)
            }
            Err(UpstreamError::Status { status, body }) => {
                self.sink.record(&Diagnostic::UpstreamStatus {
                    status: status.as_u16(),
                    body,
                });
                RelayResponse::reply(StatusCode::OK, replies::UPSTREAM_HICCUP, Outcome::UpstreamFailed)
            }
            Err(e) => {
                self.sink.record(&Diagnostic::UpstreamFailure {
                    error: e.to_string(),
                });
                RelayResponse::reply(StatusCode::OK, replies::UPSTREAM_FAILURE, Outcome::UpstreamFailed)
            }
        }
    }
}
