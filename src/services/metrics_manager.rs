use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::relay::Outcome;

/// Per-outcome counts; serializes as `{"outcome_usage": {"static_reply": 3, ...}}`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub outcome_usage: HashMap<Outcome, u64>,
}

impl MetricsData {
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.outcome_usage.get(&outcome).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl MetricsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_outcome(&self, outcome: Outcome) {
        let mut data = self.inner.write().await;
        *data.outcome_usage.entry(outcome).or_insert(0) += 1;
    }

    pub async fn snapshot(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_each_outcome_separately() {
        let metrics = MetricsManager::new();
        metrics.record_outcome(Outcome::StaticReply).await;
        metrics.record_outcome(Outcome::StaticReply).await;
        metrics.record_outcome(Outcome::UpstreamFailed).await;

        let data = metrics.snapshot().await;
        assert_eq!(data.count(Outcome::StaticReply), 2);
        assert_eq!(data.count(Outcome::UpstreamFailed), 1);
        assert_eq!(data.count(Outcome::Relayed), 0);
    }

    #[tokio::test]
    async fn snapshot_uses_snake_case_outcome_keys() {
        let metrics = MetricsManager::new();
        metrics.record_outcome(Outcome::EmptyMessage).await;

        let value = serde_json::to_value(metrics.snapshot().await).unwrap();
        assert_eq!(value["outcome_usage"]["empty_message"], 1);
    }
}
