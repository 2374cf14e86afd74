use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-wide admission control for outbound generation calls.
///
/// Keeps the timestamps of recently admitted calls and admits a new one only
/// while fewer than `max_calls` fall inside the trailing `period`. Pruning
/// happens lazily on every check, there is no background timer.
///
/// The window is approximate: calls admitted at the tail of one window and
/// the head of the next can add up to `2 * max_calls - 1` admissions across
/// two adjacent windows.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    period: Duration,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Self {
        Self {
            max_calls,
            period,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// Check admission against the current time
    pub fn allow_request(&self) -> bool {
        self.allow_request_at(Instant::now())
    }

    /// Check admission as if the clock read `now`
    pub fn allow_request_at(&self, now: Instant) -> bool {
        // A poisoned lock still holds a valid timestamp queue.
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());

        while let Some(oldest) = calls.front() {
            if now.saturating_duration_since(*oldest) < self.period {
                break;
            }
            calls.pop_front();
        }

        if calls.len() < self.max_calls {
            calls.push_back(now);
            tracing::trace!(in_window = calls.len(), max_calls = self.max_calls, "request admitted");
            true
        } else {
            tracing::warn!(
                in_window = calls.len(),
                max_calls = self.max_calls,
                period_secs = self.period.as_secs_f64(),
                "rate limit reached"
            );
            false
        }
    }

    /// Admissions currently inside the window
    pub fn in_window(&self) -> usize {
        self.occupancy_at(Instant::now())
    }

    /// Admissions inside the window ending at `now`. Does not modify the queue.
    pub fn occupancy_at(&self, now: Instant) -> usize {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls
            .iter()
            .filter(|t| now.saturating_duration_since(**t) < self.period)
            .count()
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(60))
    }
}
