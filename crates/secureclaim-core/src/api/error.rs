use serde_json::Value;
use thiserror::Error;

/// Fallback message when the token endpoint rejects a sign-in without a usable `detail`.
pub const SIGN_IN_FALLBACK: &str = "Invalid credentials";

/// Fallback message when the signup endpoint rejects a sign-up without a usable `detail`.
pub const SIGN_UP_FALLBACK: &str = "Sign up failed";

#[derive(Error, Debug)]
pub enum AuthError {
    /// The server answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed; no request was sent.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl AuthError {
    /// Build a rejection from a non-success response body.
    ///
    /// Uses the body's `detail` field when it is a non-empty string, or the
    /// joined `msg` entries when `detail` is a list of validation errors.
    /// Anything else falls back to `fallback`.
    pub fn from_body(body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| extract_detail(&v))
            .unwrap_or_else(|| fallback.to_string());
        AuthError::Rejected(message)
    }

    /// Human-readable text suitable for showing to the user
    pub fn message(&self) -> String {
        match self {
            AuthError::Rejected(msg) => msg.clone(),
            AuthError::Network(e) if e.is_timeout() => {
                "Connection timed out. Please try again.".to_string()
            }
            AuthError::Network(e) if e.is_connect() => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AuthError::Rejected(_))
    }
}

fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_message(err: AuthError) -> String {
        match err {
            AuthError::Rejected(msg) => msg,
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_from_body_uses_detail() {
        let err = AuthError::from_body(r#"{"detail": "bad password"}"#, SIGN_IN_FALLBACK);
        assert_eq!(rejected_message(err), "bad password");
    }

    #[test]
    fn test_from_body_unparseable_uses_fallback() {
        assert_eq!(
            rejected_message(AuthError::from_body("", SIGN_IN_FALLBACK)),
            "Invalid credentials"
        );
        assert_eq!(
            rejected_message(AuthError::from_body("<html>502</html>", SIGN_UP_FALLBACK)),
            "Sign up failed"
        );
    }

    #[test]
    fn test_from_body_missing_or_empty_detail() {
        assert_eq!(
            rejected_message(AuthError::from_body(r#"{"error": "nope"}"#, SIGN_IN_FALLBACK)),
            SIGN_IN_FALLBACK
        );
        assert_eq!(
            rejected_message(AuthError::from_body(r#"{"detail": ""}"#, SIGN_UP_FALLBACK)),
            SIGN_UP_FALLBACK
        );
        assert_eq!(
            rejected_message(AuthError::from_body(r#"{"detail": 42}"#, SIGN_UP_FALLBACK)),
            SIGN_UP_FALLBACK
        );
    }

    #[test]
    fn test_from_body_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "username"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "password"], "msg": "too short", "type": "value_error"}
        ]}"#;
        assert_eq!(
            rejected_message(AuthError::from_body(body, SIGN_UP_FALLBACK)),
            "field required; too short"
        );
    }

    #[test]
    fn test_rejected_display_is_message() {
        let err = AuthError::Rejected("Username already registered".to_string());
        assert_eq!(err.to_string(), "Username already registered");
        assert_eq!(err.message(), "Username already registered");
        assert!(err.is_rejected());
    }

    #[test]
    fn test_client_build_error_is_not_network() {
        let build_err = reqwest::Client::builder()
            .user_agent("bad\nagent")
            .build()
            .expect_err("invalid user agent should fail to build");
        let err = AuthError::ClientBuild(build_err);

        assert!(!err.is_rejected());
        assert!(!matches!(err, AuthError::Network(_)));
        assert!(err.message().starts_with("Failed to build HTTP client"));
    }
}
