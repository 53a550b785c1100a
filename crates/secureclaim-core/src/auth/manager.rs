//! Session manager: the single owner of the current session.
//!
//! The manager is constructed once at start-up and handed to whatever needs
//! it. Consumers read snapshots with `state()` or follow changes through the
//! `watch::Receiver` returned by `subscribe()`.

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{AuthClient, AuthError};

use super::session::{Session, SessionState};
use super::storage::{SessionStore, StorageError};

/// Storage key of the persisted session record
pub const SESSION_KEY: &str = "auth_user";

pub struct SessionManager {
    client: AuthClient,
    store: Box<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager in the `Loading` state. Call `initialize` before use.
    pub fn new(client: AuthClient, store: impl SessionStore + 'static) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            client,
            store: Box::new(store),
            state,
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// A record that fails to parse is removed and the manager continues
    /// unauthenticated. Always leaves the `Loading` state.
    pub fn initialize(&self) -> SessionState {
        self.state.send_replace(SessionState::Loading);

        let restored = match self.store.get(SESSION_KEY) {
            Ok(Some(contents)) => match serde_json::from_str::<Session>(&contents) {
                Ok(session) => {
                    debug!(email = %session.email, "Session restored");
                    Some(session)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session record");
                    if let Err(e) = self.store.remove(SESSION_KEY) {
                        warn!(error = %e, "Failed to remove unreadable session record");
                    }
                    None
                }
            },
            Ok(None) => {
                debug!("No session record found");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session record");
                None
            }
        };

        let next = match restored {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Unauthenticated,
        };
        self.state.send_replace(next.clone());
        next
    }

    /// Create an account. Does not sign in.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<Value, AuthError> {
        let payload = self.client.sign_up(username, password).await?;
        info!(username = %username, "Account created");
        Ok(payload)
    }

    /// Exchange credentials for a session, make it current, and persist it.
    ///
    /// On failure the current session is left untouched.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let token = self.client.request_token(username, password).await?;
        let session = Session::from(token);

        // State and stored record change under the same lock so overlapping
        // sign-ins cannot leave them pointing at different sessions.
        self.state.send_modify(|state| {
            *state = SessionState::Authenticated(session.clone());
            self.persist(&session);
        });

        info!(email = %session.email, "Signed in");
        Ok(session)
    }

    /// Drop the current session and its persisted copy. Always succeeds.
    pub fn sign_out(&self) {
        self.state.send_replace(SessionState::Unauthenticated);
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to remove session record");
        }
        info!("Signed out");
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.state.borrow().session().map(|s| s.access_token.clone())
    }

    fn persist(&self, session: &Session) {
        let result = serde_json::to_string(session)
            .map_err(StorageError::from)
            .and_then(|contents| self.store.set(SESSION_KEY, &contents));
        if let Err(e) = result {
            warn!(error = %e, "Failed to save session");
        }
    }
}
