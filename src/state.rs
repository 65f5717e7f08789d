// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::completion::UpstreamError;
use crate::services::diagnostics::TracingSink;
use crate::services::metrics_manager::MetricsManager;
use crate::services::relay::ChatRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: ChatRelay,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self {
            relay,
            metrics: MetricsManager::new(),
        }
    }

    /// Production wiring: OpenAI client when keyed, diagnostics through `tracing`.
    pub fn from_config(config: RelayConfig) -> Result<Self, UpstreamError> {
        let relay = ChatRelay::from_config(config, Arc::new(TracingSink))?;
        Ok(Self::new(relay))
    }
}
