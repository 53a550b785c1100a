//! Application state management for SecureClaim.
//!
//! This module contains the `App` struct that owns the session manager,
//! follows its session subscription to pick the active screen, and holds
//! the auth form and dashboard UI state.

use std::path::PathBuf;

use secureclaim_core::auth::{SessionManager, SessionState};
use secureclaim_core::{AuthError, Config};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::dashboard::ACTIONS;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Environment variable that pre-fills the username field
pub const USERNAME_ENV: &str = "SECURECLAIM_USERNAME";

// ============================================================================
// UI State Types
// ============================================================================

/// Which screen is shown, derived from the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Auth,
    Dashboard,
}

/// Auth screen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Create account",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn toggle_hint(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account? [Ctrl+T] Sign up",
            AuthMode::SignUp => "Already have an account? [Ctrl+T] Sign in",
        }
    }

    fn failure_title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in failed",
            AuthMode::SignUp => "Sign up failed",
        }
    }
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Username,
    Password,
    Button,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    /// An auth request is queued; the main loop runs it after the next draw
    Submitting,
    ConfirmingQuit,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Transient notice shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
}

impl Toast {
    fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            kind: ToastKind::Info,
        }
    }

    fn error(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            kind: ToastKind::Error,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    /// Where the config is written back; `None` means the default location
    config_path: Option<PathBuf>,
    pub session: SessionManager,
    session_rx: watch::Receiver<SessionState>,
    pub session_state: SessionState,

    pub state: AppState,
    pub toast: Option<Toast>,

    // Auth form
    pub auth_mode: AuthMode,
    pub auth_focus: AuthFocus,
    pub username: String,
    pub password: String,

    // Dashboard
    pub action_selection: usize,
}

impl App {
    /// Wrap an already-constructed session manager. The manager is
    /// initialized here if it has not been already.
    pub fn new(config: Config, session: SessionManager) -> Self {
        let mut session_rx = session.subscribe();
        let loading = session_rx.borrow().is_loading();
        if loading {
            session.initialize();
        }
        let session_state = session_rx.borrow_and_update().clone();
        debug!(authenticated = session_state.is_authenticated(), "Session state at start-up");

        let username = std::env::var(USERNAME_ENV)
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();

        let auth_focus = if username.is_empty() {
            AuthFocus::Username
        } else {
            AuthFocus::Password
        };

        Self {
            config,
            config_path: None,
            session,
            session_rx,
            session_state,
            state: AppState::Normal,
            toast: None,
            auth_mode: AuthMode::SignIn,
            auth_focus,
            username,
            password: String::new(),
            action_selection: 0,
        }
    }

    /// Save the config to `path` instead of the default location
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    fn save_config(&self) -> anyhow::Result<()> {
        match self.config_path {
            Some(ref path) => self.config.save_to(path),
            None => self.config.save(),
        }
    }

    pub fn screen(&self) -> Screen {
        match self.session_state {
            SessionState::Loading => Screen::Loading,
            SessionState::Unauthenticated => Screen::Auth,
            SessionState::Authenticated(_) => Screen::Dashboard,
        }
    }

    /// Pull the latest session state from the subscription.
    /// Returns true if the screen may need to change.
    pub fn sync_session(&mut self) -> bool {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let previous = self.screen();
        self.session_state = self.session_rx.borrow_and_update().clone();
        let current = self.screen();
        if previous != current {
            debug!(?previous, ?current, "Screen changed");
            if current == Screen::Dashboard {
                self.action_selection = 0;
            }
        }
        true
    }

    // =========================================================================
    // Auth Screen
    // =========================================================================

    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = match self.auth_mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.toast = None;
        self.password.clear();
    }

    /// Queue a submit if both fields are filled. Blank input is ignored.
    pub fn request_submit(&mut self) {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return;
        }
        self.toast = None;
        self.state = AppState::Submitting;
    }

    pub fn is_submitting(&self) -> bool {
        self.state == AppState::Submitting
    }

    /// Run the queued sign-in or sign-up request
    pub async fn submit(&mut self) {
        let username = self.username.trim().to_string();
        let password = self.password.clone();
        let mode = self.auth_mode;

        let result = match mode {
            AuthMode::SignUp => self.session.sign_up(&username, &password).await.map(|_| ()),
            AuthMode::SignIn => self.session.sign_in(&username, &password).await.map(|_| ()),
        };

        self.state = AppState::Normal;
        match result {
            Ok(()) => self.on_submit_success(mode, username),
            Err(e) => self.on_submit_failure(mode, &e),
        }
        self.sync_session();
    }

    fn on_submit_success(&mut self, mode: AuthMode, username: String) {
        match mode {
            AuthMode::SignUp => {
                self.toast = Some(Toast::info("Account created!", "You can now sign in."));
                self.auth_mode = AuthMode::SignIn;
                self.auth_focus = AuthFocus::Password;
            }
            AuthMode::SignIn => {
                self.config.last_username = Some(username);
                if let Err(e) = self.save_config() {
                    warn!(error = %e, "Failed to save config");
                }
                info!("Sign in complete");
            }
        }
        self.password.clear();
    }

    fn on_submit_failure(&mut self, mode: AuthMode, err: &AuthError) {
        warn!(error = %err, mode = ?mode, "Auth request failed");
        self.toast = Some(Toast::error(mode.failure_title(), err.message()));
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.toast = None;
        self.password.clear();
        self.auth_mode = AuthMode::SignIn;
        self.auth_focus = if self.username.is_empty() {
            AuthFocus::Username
        } else {
            AuthFocus::Password
        };
        self.sync_session();
    }

    pub fn select_next_action(&mut self) {
        self.action_selection = (self.action_selection + 1) % ACTIONS.len();
    }

    pub fn select_prev_action(&mut self) {
        self.action_selection = (self.action_selection + ACTIONS.len() - 1) % ACTIONS.len();
    }

    pub fn signed_in_email(&self) -> Option<&str> {
        self.session_state.session().map(|s| s.email.as_str())
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
