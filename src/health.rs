use std::time::SystemTime;
use serde::{Deserialize, Serialize};

use crate::rate_limiter::RateLimiter;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub rate_limiter: LimiterStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LimiterStatus {
    pub in_window: usize,
    pub max_calls: usize,
    pub period_seconds: u64,
}

static START_TIME: std::sync::LazyLock<SystemTime> = std::sync::LazyLock::new(SystemTime::now);

/// Touch the start time so uptime counts from boot rather than the first probe.
pub fn mark_started() {
    std::sync::LazyLock::force(&START_TIME);
}

pub fn check_health(rate_limiter: &RateLimiter) -> HealthStatus {
    let now = SystemTime::now();
    let uptime = now.duration_since(*START_TIME)
        .unwrap_or_default()
        .as_secs();

    let in_window = rate_limiter.in_window();
    let status = if in_window >= rate_limiter.max_calls() {
        "saturated"
    } else {
        "healthy"
    };

    HealthStatus {
        status: status.to_string(),
        timestamp: now.duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        rate_limiter: LimiterStatus {
            in_window,
            max_calls: rate_limiter.max_calls(),
            period_seconds: rate_limiter.period().as_secs(),
        },
    }
}
