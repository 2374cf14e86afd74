use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::StylistError;
use crate::generation::GenerationHandler;
use crate::health;
use crate::language::Language;
use crate::metrics::MetricsCollector;
use crate::rate_limiter::RateLimiter;
use crate::response::{outcome_text, AdviceResponse, TrendsResponse};
use crate::translations;

const MISSING_QUERY: &str = "Please describe what you need";

/// Shared application state
pub type SharedState = Arc<AppState>;

/// Process-wide state, built once at startup
pub struct AppState {
    pub rate_limiter: RateLimiter,
    pub generation: GenerationHandler,
    pub metrics: MetricsCollector,
}

impl AppState {
    pub fn new(rate_limiter: RateLimiter, generation: GenerationHandler) -> Self {
        Self {
            rate_limiter,
            generation,
            metrics: MetricsCollector::new(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdviceRequest {
    #[validate(
        required(message = "Please describe what you need"),
        length(min = 1, message = "Please describe what you need")
    )]
    pub query: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsRequest {
    #[serde(default)]
    pub language: Option<String>,
}

async fn admit(state: &AppState, endpoint: &str) -> Result<(), StylistError> {
    if state.rate_limiter.allow_request() {
        Ok(())
    } else {
        state.metrics.record_rate_limited(endpoint).await;
        Err(StylistError::RateLimitExceeded)
    }
}

/// Styling advice for a free-text query
pub async fn style_advice(
    State(state): State<SharedState>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<AdviceResponse>, StylistError> {
    const ENDPOINT: &str = "style_advice";
    admit(&state, ENDPOINT).await?;

    let request = match payload {
        Ok(Json(request)) if request.validate().is_ok() => request,
        Ok(_) => {
            state.metrics.record_rejected(ENDPOINT).await;
            return Err(StylistError::Validation(MISSING_QUERY.to_string()));
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable advice request body");
            state.metrics.record_rejected(ENDPOINT).await;
            return Err(StylistError::Validation(MISSING_QUERY.to_string()));
        }
    };

    let language = Language::from_optional(request.language.as_deref());
    let query = request.query.unwrap_or_default();
    tracing::info!(%language, query_chars = query.chars().count(), "style advice requested");

    let outcome = state.generation.request_advice(&query, language).await;
    state.metrics.record_outcome(ENDPOINT, &outcome).await;

    Ok(Json(AdviceResponse {
        advice: outcome_text(outcome)?,
    }))
}

/// Current fashion trends
pub async fn fashion_trends(
    State(state): State<SharedState>,
    payload: Result<Json<TrendsRequest>, JsonRejection>,
) -> Result<Json<TrendsResponse>, StylistError> {
    const ENDPOINT: &str = "fashion_trends";
    admit(&state, ENDPOINT).await?;

    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let language = Language::from_optional(request.language.as_deref());
    tracing::info!(%language, "fashion trends requested");

    let outcome = state.generation.request_trends(language).await;
    state.metrics.record_outcome(ENDPOINT, &outcome).await;

    Ok(Json(TrendsResponse {
        trends: outcome_text(outcome)?,
    }))
}

/// UI strings for a language code, English when unknown
pub async fn get_translations(Path(lang): Path<String>) -> impl IntoResponse {
    Json(translations::for_language(Language::from_code(&lang)))
}

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(health::check_health(&state.rate_limiter))
}

/// Request and outcome counters
pub async fn get_metrics(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.metrics.snapshot().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_request_validation() {
        let ok: AdviceRequest = serde_json::from_str(r#"{"query": "linen suit?"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let empty: AdviceRequest = serde_json::from_str(r#"{"query": ""}"#).unwrap();
        assert!(empty.validate().is_err());

        let missing: AdviceRequest = serde_json::from_str(r#"{"language": "kn"}"#).unwrap();
        assert!(missing.validate().is_err());
    }
}
