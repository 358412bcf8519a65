//! Lime Tools Server
//!
//! A small internal console: admins manage a roster of accounts kept in a
//! JSON file and browse placeholder third-party connections. Sessions are
//! held in memory for the life of the process.

mod error;
mod extractors;
mod handlers;
mod services;
mod storage;
mod views;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use lime_types::{Role, User};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use services::AuthService;
use storage::{RosterStore, SessionTable};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(users_file: PathBuf) -> Self {
        let roster = Arc::new(RosterStore::new(users_file));
        let sessions = Arc::new(SessionTable::new());
        let auth_service = Arc::new(AuthService::new(roster.clone(), sessions));
        Self {
            roster,
            auth_service,
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Lime Tools Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, users_file={}",
        config.bind_address,
        config.users_file.display()
    );

    let state = AppState::new(config.users_file.clone());

    if let Some((email, password)) = &config.bootstrap_admin {
        bootstrap_admin(&state.roster, email, password)
            .await
            .context("Failed to write bootstrap admin")?;
    }

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Every console route. Unknown paths and wrong methods get a plain 404.
pub fn build_router(state: AppState) -> Router {
    use handlers::{auth, not_found, pages, users};

    Router::new()
        .route("/", get(pages::home).fallback(not_found))
        .route(
            "/login",
            get(auth::login_form).post(auth::login).fallback(not_found),
        )
        .route("/logout", get(auth::logout).fallback(not_found))
        .route("/connections", get(pages::connections).fallback(not_found))
        .route("/users", get(users::list).fallback(not_found))
        .route("/users/add", post(users::add).fallback(not_found))
        .route("/users/delete", post(users::delete).fallback(not_found))
        .route("/users/edit", post(users::edit).fallback(not_found))
        .route("/users/update", post(users::update).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Seed an admin account into an empty roster so a fresh install can sign in.
///
/// Returns whether a record was written.
async fn bootstrap_admin(roster: &RosterStore, email: &str, password: &str) -> Result<bool> {
    if !roster.load().await.is_empty() {
        return Ok(false);
    }

    warn!(
        "Roster at {} is empty, creating bootstrap admin {}",
        roster.path().display(),
        email
    );
    roster
        .save(&[User {
            name: "Admin".to_string(),
            surname: String::new(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Admin,
        }])
        .await?;
    Ok(true)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: SocketAddr,
    users_file: PathBuf,
    bootstrap_admin: Option<(String, String)>,
}

fn load_config() -> Result<Config> {
    info!("Loading configuration from environment...");

    let bind_address: SocketAddr = std::env::var("BIND_ADDRESS")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .context("Failed to parse bind address")?;

    let users_file = std::env::var("USERS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(data_dir).join("users.json")
        });

    let bootstrap_admin = match (
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => Some((email, password)),
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
            warn!("Only one of BOOTSTRAP_ADMIN_EMAIL/BOOTSTRAP_ADMIN_PASSWORD is set, ignoring");
            None
        }
        _ => None,
    };

    Ok(Config {
        bind_address,
        users_file,
        bootstrap_admin,
    })
}
