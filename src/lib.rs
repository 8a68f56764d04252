//! Campus ERP backend: a JSON API for a small college.
//!
//! Accounts carry one of three roles (admin, faculty, student). Admins manage
//! the course catalog, departments, people and attendance; faculty see their
//! assigned courses; everyone maintains their own profile. Authentication is
//! stateless JWT.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
