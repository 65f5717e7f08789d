use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::Method,
};
use tracing::warn;

use crate::services::metrics_manager::MetricsData;
use crate::services::relay::RelayResponse;
use crate::state::SharedState;

pub async fn chat_handler(
    State(state): State<SharedState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> RelayResponse {
    let response = match body {
        Ok(body) => state.relay.handle(&method, &body).await,
        Err(rejection) => {
            warn!(error = %rejection, "chat request body could not be read");
            state.relay.unreadable_body(&method)
        }
    };
    state.metrics.record_outcome(response.outcome).await;
    response
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.snapshot().await)
}
