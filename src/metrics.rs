use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};

use crate::generation::GenerationOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMetrics {
    pub total_requests: u64,
    pub rate_limited: u64,
    pub rejected: u64,
    pub success: u64,
    pub degraded: u64,
    pub empty: u64,
    pub transport_error: u64,
}

impl EndpointMetrics {
    fn absorb(&mut self, other: &EndpointMetrics) {
        self.total_requests += other.total_requests;
        self.rate_limited += other.rate_limited;
        self.rejected += other.rejected;
        self.success += other.success;
        self.degraded += other.degraded;
        self.empty += other.empty;
        self.transport_error += other.transport_error;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub global: EndpointMetrics,
    pub endpoints: HashMap<String, EndpointMetrics>,
}

/// In-process counters per endpoint, reset on restart.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    endpoints: Arc<RwLock<HashMap<String, EndpointMetrics>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_rate_limited(&self, endpoint: &str) {
        self.update(endpoint, |m| m.rate_limited += 1).await;
    }

    pub async fn record_rejected(&self, endpoint: &str) {
        self.update(endpoint, |m| m.rejected += 1).await;
    }

    pub async fn record_outcome(&self, endpoint: &str, outcome: &GenerationOutcome) {
        self.update(endpoint, |m| match outcome {
            GenerationOutcome::Success { .. } => m.success += 1,
            GenerationOutcome::Degraded { .. } => m.degraded += 1,
            GenerationOutcome::Empty => m.empty += 1,
            GenerationOutcome::TransportError => m.transport_error += 1,
        })
        .await;
    }

    async fn update(&self, endpoint: &str, f: impl FnOnce(&mut EndpointMetrics)) {
        let mut endpoints = self.endpoints.write().await;
        let metrics = endpoints.entry(endpoint.to_string()).or_default();
        metrics.total_requests += 1;
        f(metrics);
    }

    pub async fn get_endpoint_metrics(&self, endpoint: &str) -> Option<EndpointMetrics> {
        self.endpoints.read().await.get(endpoint).cloned()
    }

    pub async fn snapshot(&self) -> MetricsSnapshot {
        let endpoints = self.endpoints.read().await.clone();
        let mut global = EndpointMetrics::default();
        for metrics in endpoints.values() {
            global.absorb(metrics);
        }

        MetricsSnapshot { global, endpoints }
    }
}
