//! Bounded-retry wrapper around the text generator.
//!
//! Each request builds one prompt, submits it up to `max_attempts` times with
//! a fixed delay between attempts, and classifies what came back. Failures
//! from the generator never escape this module; they become a
//! [`GenerationOutcome`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::generator::TextGenerator;
use crate::language::Language;
use crate::prompt;

/// Text at or below this many characters is treated as an incomplete answer.
pub const MIN_RESPONSE_CHARS: usize = 50;

/// Result of one generation request after retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { text: String },
    /// Non-empty but short text from the final attempt. Returned to the
    /// caller as-is rather than as an error.
    Degraded { text: String },
    Empty,
    TransportError,
}

impl GenerationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationOutcome::Success { .. } => "success",
            GenerationOutcome::Degraded { .. } => "degraded",
            GenerationOutcome::Empty => "empty",
            GenerationOutcome::TransportError => "transport_error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub min_chars: usize,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            min_chars: MIN_RESPONSE_CHARS,
        }
    }

    /// No waiting between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

#[derive(Clone)]
pub struct GenerationHandler {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl GenerationHandler {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Ask for styling advice on `query`. The caller guarantees it is non-empty.
    pub async fn request_advice(&self, query: &str, language: Language) -> GenerationOutcome {
        let prompt = prompt::advice_prompt(query, language);
        self.run(&prompt, "advice").await
    }

    /// Ask for this month's trends.
    pub async fn request_trends(&self, language: Language) -> GenerationOutcome {
        let prompt = prompt::trends_prompt(language, &prompt::current_month());
        self.run(&prompt, "trends").await
    }

    async fn run(&self, prompt: &str, kind: &'static str) -> GenerationOutcome {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let last = attempt >= max_attempts;

            debug!(
                kind,
                attempt,
                max_attempts,
                generator = self.generator.name(),
                "calling generator"
            );

            match self.generator.generate(prompt).await {
                Ok(text) if text.chars().count() > self.policy.min_chars => {
                    info!(kind, attempt, chars = text.chars().count(), "generation succeeded");
                    return GenerationOutcome::Success { text };
                }
                Ok(text) => {
                    warn!(kind, attempt, chars = text.chars().count(), "generation too short");
                    if last {
                        return if text.is_empty() {
                            GenerationOutcome::Empty
                        } else {
                            GenerationOutcome::Degraded { text }
                        };
                    }
                }
                Err(err) => {
                    warn!(kind, attempt, error = %err, "generation failed");
                    if last {
                        return GenerationOutcome::TransportError;
                    }
                }
            }

            if !self.policy.delay.is_zero() {
                debug!(kind, delay_ms = self.policy.delay.as_millis() as u64, "backing off");
                tokio::time::sleep(self.policy.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TransportFailure;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Replays scripted replies and records every prompt it receives.
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, TransportFailure>>>,
        fallback: Result<String, TransportFailure>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn always(reply: Result<String, TransportFailure>) -> Arc<Self> {
            Self::scripted(Vec::new(), reply)
        }

        fn scripted(
            replies: Vec<Result<String, TransportFailure>>,
            fallback: Result<String, TransportFailure>,
        ) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                fallback,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, TransportFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            let next = self.replies.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.fallback.clone())
        }
    }

    fn network_error() -> TransportFailure {
        TransportFailure::Network("connection refused".to_string())
    }

    fn handler(generator: Arc<ScriptedGenerator>) -> GenerationHandler {
        GenerationHandler::new(generator, RetryPolicy::immediate(3))
    }

    #[tokio::test]
    async fn test_long_text_succeeds_on_first_attempt() {
        let text = "a".repeat(200);
        let generator = ScriptedGenerator::always(Ok(text.clone()));

        let outcome = handler(generator.clone())
            .request_advice("summer picnic outfit", Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::Success { text });
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_exhausts_retries() {
        let generator = ScriptedGenerator::always(Ok(String::new()));

        let outcome = handler(generator.clone())
            .request_advice("summer picnic outfit", Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::Empty);
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_failures_then_success() {
        let text = "b".repeat(100);
        let generator = ScriptedGenerator::scripted(
            vec![Err(network_error()), Err(network_error())],
            Ok(text.clone()),
        );

        let outcome = handler(generator.clone())
            .request_advice("job interview", Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::Success { text });
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_persistent_failure_is_transport_error() {
        let generator = ScriptedGenerator::always(Err(network_error()));

        let outcome = handler(generator.clone())
            .request_advice("job interview", Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::TransportError);
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_short_text_on_last_attempt_is_degraded() {
        let generator = ScriptedGenerator::always(Ok("Wear blue.".to_string()));

        let outcome = handler(generator.clone())
            .request_advice("date night", Language::En)
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::Degraded {
                text: "Wear blue.".to_string()
            }
        );
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_exactly_fifty_chars_is_too_short() {
        let generator = ScriptedGenerator::scripted(
            vec![Ok("x".repeat(50))],
            Ok("y".repeat(51)),
        );

        let outcome = handler(generator.clone())
            .request_advice("gala", Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::Success { text: "y".repeat(51) });
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_last_attempt_error_wins_over_earlier_short_text() {
        let generator = ScriptedGenerator::scripted(
            vec![Ok("short".to_string()), Ok(String::new())],
            Err(network_error()),
        );

        let outcome = handler(generator.clone())
            .request_trends(Language::En)
            .await;

        assert_eq!(outcome, GenerationOutcome::TransportError);
    }

    #[tokio::test]
    async fn test_same_prompt_on_every_attempt() {
        let generator = ScriptedGenerator::always(Ok(String::new()));

        handler(generator.clone())
            .request_advice("rainy day commute", Language::Kn)
            .await;

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts.iter().all(|p| p == &prompts[0]));
        assert!(prompts[0].starts_with("Respond in Kannada"));
        assert!(prompts[0].contains("rainy day commute"));
    }

    #[tokio::test]
    async fn test_trends_prompt_has_no_query() {
        let generator = ScriptedGenerator::always(Ok("t".repeat(80)));

        let outcome = handler(generator.clone()).request_trends(Language::Hi).await;

        assert!(matches!(outcome, GenerationOutcome::Success { .. }));
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Respond in Hindi"));
        assert!(prompts[0].contains("List 5 current fashion trends"));
    }

    #[tokio::test]
    async fn test_fixed_delay_between_attempts() {
        let generator = ScriptedGenerator::always(Err(network_error()));
        let handler = GenerationHandler::new(
            generator.clone(),
            RetryPolicy::new(3, Duration::from_millis(20)),
        );

        let started = Instant::now();
        let outcome = handler.request_advice("wedding", Language::En).await;

        assert_eq!(outcome, GenerationOutcome::TransportError);
        // Two waits between three attempts, none after the last.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_zero_attempts_still_calls_once() {
        let generator = ScriptedGenerator::always(Ok("z".repeat(60)));
        let handler = GenerationHandler::new(generator.clone(), RetryPolicy::immediate(0));

        let outcome = tokio_test::block_on(handler.request_advice("brunch", Language::En));

        assert!(matches!(outcome, GenerationOutcome::Success { .. }));
        assert_eq!(generator.calls(), 1);
    }
}
