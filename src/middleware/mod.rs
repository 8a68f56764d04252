//! Request middleware: authentication and role gating.
//!
//! 1. The client sends `Authorization: Bearer <token>`.
//! 2. [`auth::AuthUser`] verifies the token, normalizes the claims and
//!    confirms the account is still active.
//! 3. [`role`] helpers check the identity's role against a route's
//!    allow-list.
//! 4. Handlers apply any per-resource ownership rule on top.

pub mod auth;
pub mod role;
