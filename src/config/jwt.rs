use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token time-to-live in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    /// Load from the environment. A missing `JWT_SECRET` is a startup
    /// failure, not a per-request one: tokens signed with a guessable
    /// default would be forgeable.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}
