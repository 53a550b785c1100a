//! API client for the SecureClaim auth service.
//!
//! Two calls: `sign_up` posts a JSON body to `/auth/signup`, and
//! `request_token` exchanges credentials for a bearer token at
//! `/auth/token` using a URL-encoded form body.

use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{SIGN_IN_FALLBACK, SIGN_UP_FALLBACK};
use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when the configuration does not name one
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const SIGNUP_PATH: &str = "/auth/signup";
const TOKEN_PATH: &str = "/auth/token";

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful body of the token endpoint. Extra fields such as
/// `token_type` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub email: String,
    pub access_token: String,
}

/// Client for the auth endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuthError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an account. Returns the server's payload as-is.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<Value, AuthError> {
        let url = self.url(SIGNUP_PATH);
        debug!(url = %url, username = %username, "Sending signup request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&SignUpRequest { username, password })
            .send()
            .await?;

        let response = Self::check_response(response, SIGN_UP_FALLBACK).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(format!("signup response is not JSON: {}", e)))
    }

    /// Exchange credentials for an access token
    pub async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, AuthError> {
        let url = self.url(TOKEN_PATH);
        debug!(url = %url, username = %username, "Sending token request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let response = Self::check_response(response, SIGN_IN_FALLBACK).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(format!("token response: {}", e)))
    }

    /// Pass successful responses through; turn anything else into a rejection
    /// carrying the server's `detail` or `fallback`.
    async fn check_response(response: Response, fallback: &str) -> Result<Response, AuthError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = AuthError::from_body(&body, fallback);
            warn!(status = %status, error = %err, "Auth request rejected");
            Err(err)
        }
    }
}
