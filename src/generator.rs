//! Capability interface for the external text-generation service.

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation call produced no result.
#[derive(Debug, Clone, Error)]
pub enum TransportFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("prompt blocked: {0}")]
    Blocked(String),
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TransportFailure>;

    /// Identifier used in logs.
    fn name(&self) -> &str {
        "generator"
    }
}
