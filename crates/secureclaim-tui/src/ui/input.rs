//! Keyboard input handling for the TUI.
//!
//! Translates key events into application state changes. Auth requests are
//! only queued here; the main loop runs them after redrawing so the
//! submitting indicator is visible.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{can_add_password_char, can_add_username_char, App, AppState, AuthFocus, Screen};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Input is locked while a request is queued or in flight
    if app.is_submitting() {
        return false;
    }

    match app.screen() {
        Screen::Loading => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                app.state = AppState::Quitting;
                return true;
            }
            false
        }
        Screen::Auth => handle_auth_input(app, key),
        Screen::Dashboard => handle_dashboard_input(app, key),
    }
}

fn handle_auth_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('t') {
            app.toggle_auth_mode();
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.auth_focus = match app.auth_focus {
                AuthFocus::Username => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Button,
                AuthFocus::Button => AuthFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.auth_focus = match app.auth_focus {
                AuthFocus::Username => AuthFocus::Button,
                AuthFocus::Password => AuthFocus::Username,
                AuthFocus::Button => AuthFocus::Password,
            };
        }
        KeyCode::Enter => match app.auth_focus {
            AuthFocus::Username => {
                app.auth_focus = AuthFocus::Password;
            }
            AuthFocus::Password | AuthFocus::Button => {
                app.request_submit();
            }
        },
        KeyCode::Backspace => match app.auth_focus {
            AuthFocus::Username => {
                app.username.pop();
            }
            AuthFocus::Password => {
                app.password.pop();
            }
            AuthFocus::Button => {}
        },
        KeyCode::Char(c) => match app.auth_focus {
            AuthFocus::Username => {
                if can_add_username_char(app.username.chars().count(), c) {
                    app.username.push(c);
                }
            }
            AuthFocus::Password => {
                if can_add_password_char(app.password.chars().count(), c) {
                    app.password.push(c);
                }
            }
            AuthFocus::Button => {}
        },
        _ => {}
    }
    false
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('o') => {
            app.sign_out();
        }
        KeyCode::Esc => {
            app.toast = None;
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            app.select_next_action();
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            app.select_prev_action();
        }
        _ => {}
    }
    false
}
