pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod generator;
pub mod handlers;
pub mod health;
pub mod language;
pub mod metrics;
pub mod middleware;
pub mod prompt;
pub mod rate_limiter;
pub mod response;
pub mod server;
pub mod translations;

pub use config::Config;
pub use error::{Result, StylistError};
pub use generation::{GenerationHandler, GenerationOutcome, RetryPolicy};
pub use generator::{TextGenerator, TransportFailure};
pub use language::Language;
pub use rate_limiter::RateLimiter;
pub use server::create_app;
