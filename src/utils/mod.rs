//! Shared utilities.
//!
//! - [`errors`]: application error type and HTTP mapping
//! - [`jwt`]: token creation and verification
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: custom field deserializers
//! - [`uploads`]: profile image storage and multipart parsing

pub mod errors;
pub mod jwt;
pub mod password;
pub mod serde;
pub mod uploads;
