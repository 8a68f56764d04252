use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

/// Rate limit configuration for the API.
///
/// Signup and login run bcrypt, so the auth endpoints get a stricter per-IP
/// bucket than the rest of the API.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests per second for auth endpoints
    pub auth_per_second: u64,
    /// Burst size for auth endpoints
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Create the GovernorConfig for auth endpoints, keyed by client IP
    /// (forwarded headers first, peer address as fallback).
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}
