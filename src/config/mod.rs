//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the browser frontend
//! - [`database`]: PostgreSQL pool initialization
//! - [`jwt`]: signing secret and token lifetime
//! - [`rate_limit`]: per-IP limits for the auth endpoints
//! - [`uploads`]: profile image directory and size cap

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod uploads;
