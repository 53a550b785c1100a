//! Core library for SecureClaim.
//!
//! - `api`: HTTP client for the SecureClaim auth endpoints
//! - `auth`: session model, session manager, and durable session storage
//! - `config`: persisted application configuration

pub mod api;
pub mod auth;
pub mod config;

pub use api::{AuthClient, AuthError};
pub use auth::{Session, SessionManager, SessionState, SessionStore};
pub use config::Config;
