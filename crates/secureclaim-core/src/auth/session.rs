use serde::{Deserialize, Serialize};

use crate::api::TokenResponse;

/// The authenticated identity. Persisted as `{"email": .., "accessToken": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Session {
    pub email: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl Session {
    pub fn new(email: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            access_token: access_token.into(),
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(resp: TokenResponse) -> Self {
        Self {
            email: resp.email,
            access_token: resp.access_token,
        }
    }
}

/// Where the session stands for this run of the application.
///
/// `Loading` only appears before `SessionManager::initialize` has finished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serializes_camel_case_token() {
        let session = Session::new("a@b.com", "tok123");
        let json = serde_json::to_value(&session).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"email": "a@b.com", "accessToken": "tok123"})
        );
    }

    #[test]
    fn test_session_rejects_snake_case_record() {
        let json = r#"{"email": "a@b.com", "access_token": "tok123"}"#;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn test_session_from_token_response() {
        let resp = TokenResponse {
            email: "a@b.com".to_string(),
            access_token: "tok123".to_string(),
        };
        assert_eq!(Session::from(resp), Session::new("a@b.com", "tok123"));
    }

    #[test]
    fn test_state_accessors() {
        let loading = SessionState::default();
        assert!(loading.is_loading());
        assert!(loading.session().is_none());

        let anon = SessionState::Unauthenticated;
        assert!(!anon.is_loading());
        assert!(!anon.is_authenticated());

        let authed = SessionState::Authenticated(Session::new("a@b.com", "tok123"));
        assert!(authed.is_authenticated());
        assert_eq!(authed.session().map(|s| s.email.as_str()), Some("a@b.com"));
    }
}
