use serde::Serialize;

use crate::error::StylistError;
use crate::generation::GenerationOutcome;

/// Shown when every attempt came back empty.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Response too short, please try again.";

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: String,
}

/// Text to return to the caller, or the error to respond with.
pub fn outcome_text(outcome: GenerationOutcome) -> Result<String, StylistError> {
    match outcome {
        GenerationOutcome::Success { text } | GenerationOutcome::Degraded { text } => Ok(text),
        GenerationOutcome::Empty => Ok(EMPTY_RESPONSE_FALLBACK.to_string()),
        GenerationOutcome::TransportError => Err(StylistError::Transport),
    }
}
