// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{any, get},
};
use chat::{chat_handler, get_metrics_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Path the site's chat widget posts to.
pub const WIDGET_CHAT_PATH: &str = "/.netlify/functions/chat";

/// Largest chat body read before the relay answers `Invalid request`.
pub const MAX_CHAT_BODY_BYTES: usize = 64 * 1024;

pub fn create_router(static_dir: &str) -> Router<SharedState> {
    // The relay answers pre-flight and 405 itself.
    let chat = any(chat_handler).layer(DefaultBodyLimit::max(MAX_CHAT_BODY_BYTES));

    Router::new()
        .route("/chat", chat.clone())
        .route(WIDGET_CHAT_PATH, chat)
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        }))
}
