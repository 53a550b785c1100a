//! REST API client module for the SecureClaim auth service.
//!
//! This module provides the `AuthClient` for the two authentication
//! endpoints: account creation (`/auth/signup`, JSON body) and token
//! exchange (`/auth/token`, URL-encoded form body).

pub mod client;
pub mod error;

pub use client::{AuthClient, TokenResponse};
pub use error::AuthError;
