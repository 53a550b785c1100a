//! SecureClaim - a terminal front end for the SecureClaim insurance portal.
//!
//! Sign in or create an account, then land on the claims dashboard. The
//! session is kept between runs until you sign out.

mod app;
mod dashboard;
mod ui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use secureclaim_core::{Config, SessionManager};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState, USERNAME_ENV};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE_PREFIX: &str = "secureclaim";

/// Log directory. Needs no loaded config, so tracing can start first.
fn log_dir() -> Result<PathBuf> {
    Ok(Config::data_dir()?.join("logs"))
}

/// Initialize the tracing subscriber.
///
/// The terminal belongs to the UI, so logs go to a file under the data
/// directory. Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir);

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::sink))
                .with(filter)
                .init();
            None
        }
    }
}

/// CLI commands own no screen, so warnings go straight to stderr.
fn init_cli_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if let Some(command) = args.get(1) {
        init_cli_tracing();
        let config = load_config();
        return run_command(command, config).await;
    }

    let _log_guard = init_tracing(&log_dir()?);
    info!("SecureClaim starting");

    let config = load_config();

    let session = config.session_manager()?;
    session.initialize();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, session);

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("SecureClaim shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.sync_session();
        terminal.draw(|f| render(f, app))?;

        // Run a queued request now that the submitting indicator is on screen
        if app.is_submitting() {
            app.submit().await;
            continue;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

// ============================================================================
// CLI Commands
// ============================================================================

const USAGE: &str = "Usage: secureclaim [--sign-in | --sign-up | --sign-out | --whoami]";

async fn run_command(command: &str, mut config: Config) -> Result<()> {
    let session = config.session_manager()?;
    session.initialize();

    match command {
        "--whoami" => {
            match session.current_session() {
                Some(s) => println!("{}", s.email),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        "--sign-out" => {
            session.sign_out();
            println!("Signed out");
            Ok(())
        }
        "--sign-in" => {
            let (username, password) = prompt_credentials(&config)?;
            let signed_in = sign_in(&session, &username, &password).await?;
            config.last_username = Some(username);
            if let Err(e) = config.save() {
                eprintln!("Warning: failed to save config: {}", e);
            }
            println!("Signed in as {}", signed_in);
            Ok(())
        }
        "--sign-up" => {
            let (username, password) = prompt_credentials(&config)?;
            let payload = session
                .sign_up(&username, &password)
                .await
                .map_err(|e| anyhow::anyhow!("Sign up failed: {}", e.message()))?;
            match payload.get("message").and_then(|m| m.as_str()) {
                Some(message) => println!("{}", message),
                None => println!("Account created! You can now sign in."),
            }
            Ok(())
        }
        "-h" | "--help" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => Err(anyhow::anyhow!("Unknown argument: {}\n{}", other, USAGE)),
    }
}

async fn sign_in(session: &SessionManager, username: &str, password: &str) -> Result<String> {
    let signed_in = session
        .sign_in(username, password)
        .await
        .map_err(|e| anyhow::anyhow!("Sign in failed: {}", e.message()))?;
    Ok(signed_in.email)
}

fn prompt_credentials(config: &Config) -> Result<(String, String)> {
    let default_user = std::env::var(USERNAME_ENV)
        .ok()
        .or_else(|| config.last_username.clone());

    match default_user {
        Some(ref user) => print!("Username [{}]: ", user),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read username")?;
    let input = input.trim();

    let username = match (input.is_empty(), default_user) {
        (true, Some(user)) => user,
        _ => input.to_string(),
    };

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(anyhow::anyhow!("Username and password required"));
    }

    Ok((username.trim().to_string(), password))
}
