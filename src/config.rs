use envconfig::Envconfig;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::StylistError;
use crate::generation::RetryPolicy;
use crate::rate_limiter::RateLimiter;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// Generation service credential
    #[envconfig(from = "GEMINI_API_KEY")]
    pub gemini_api_key: String,

    #[envconfig(from = "GEMINI_MODEL", default = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[envconfig(from = "GEMINI_BASE_URL", default = "https://generativelanguage.googleapis.com/v1beta")]
    pub gemini_base_url: String,

    /// Per-call HTTP timeout in seconds
    #[envconfig(from = "GEMINI_TIMEOUT_SECS", default = "30")]
    pub gemini_timeout_secs: u64,

    /// Server bind address
    #[envconfig(from = "BIND_ADDR", default = "127.0.0.1:5000")]
    pub bind_addr: SocketAddr,

    /// Admissions allowed per window
    #[envconfig(from = "RATE_LIMIT_MAX_CALLS", default = "10")]
    pub rate_limit_max_calls: usize,

    /// Window length in seconds
    #[envconfig(from = "RATE_LIMIT_PERIOD_SECS", default = "60")]
    pub rate_limit_period_secs: u64,

    /// Attempts per generation request
    #[envconfig(from = "MAX_RETRIES", default = "3")]
    pub max_retries: u32,

    /// Fixed wait between attempts in seconds
    #[envconfig(from = "RETRY_DELAY_SECS", default = "2")]
    pub retry_delay_secs: u64,

    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,
}

/// Upper bound for `RATE_LIMIT_MAX_CALLS`.
pub const MAX_RATE_LIMIT_CALLS: usize = 100_000;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, StylistError> {
        let config = Config::init_from_env().map_err(|e| StylistError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StylistError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(StylistError::Configuration("GEMINI_API_KEY cannot be empty".to_string()));
        }
        if self.rate_limit_max_calls == 0 {
            return Err(StylistError::Configuration(
                "RATE_LIMIT_MAX_CALLS must be greater than 0".to_string(),
            ));
        }
        if self.rate_limit_max_calls > MAX_RATE_LIMIT_CALLS {
            return Err(StylistError::Configuration(format!(
                "RATE_LIMIT_MAX_CALLS must be at most {}",
                MAX_RATE_LIMIT_CALLS
            )));
        }
        if self.rate_limit_period_secs == 0 {
            return Err(StylistError::Configuration(
                "RATE_LIMIT_PERIOD_SECS must be greater than 0".to_string(),
            ));
        }
        if self.gemini_timeout_secs == 0 {
            return Err(StylistError::Configuration(
                "GEMINI_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(StylistError::Configuration("MAX_RETRIES must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            self.rate_limit_max_calls,
            Duration::from_secs(self.rate_limit_period_secs),
        )
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_secs(self.retry_delay_secs))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_timeout_secs", &self.gemini_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("rate_limit_max_calls", &self.rate_limit_max_calls)
            .field("rate_limit_period_secs", &self.rate_limit_period_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::init_from_hashmap(&vars(&[("GEMINI_API_KEY", "secret")])).unwrap();

        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.bind_addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.rate_limit_max_calls, 10);
        assert_eq!(config.rate_limit_period_secs, 60);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key() {
        assert!(Config::init_from_hashmap(&HashMap::new()).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let config = Config::init_from_hashmap(&vars(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config::init_from_hashmap(&vars(&[
            ("GEMINI_API_KEY", "secret"),
            ("RATE_LIMIT_MAX_CALLS", "0"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_max_calls_rejected() {
        let config = Config::init_from_hashmap(&vars(&[
            ("GEMINI_API_KEY", "secret"),
            ("RATE_LIMIT_MAX_CALLS", "18446744073709551615"),
        ]))
        .unwrap();
        assert!(matches!(config.validate(), Err(StylistError::Configuration(_))));

        let config = Config::init_from_hashmap(&vars(&[
            ("GEMINI_API_KEY", "secret"),
            ("RATE_LIMIT_MAX_CALLS", "100000"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_limiter().max_calls(), MAX_RATE_LIMIT_CALLS);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config::init_from_hashmap(&vars(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert!(matches!(config.validate(), Err(StylistError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::init_from_hashmap(&vars(&[("GEMINI_API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_derived_components() {
        let config = Config::init_from_hashmap(&vars(&[
            ("GEMINI_API_KEY", "secret"),
            ("RATE_LIMIT_MAX_CALLS", "4"),
            ("RETRY_DELAY_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.rate_limiter().max_calls(), 4);
        assert_eq!(config.retry_policy().delay, Duration::ZERO);
    }
}
