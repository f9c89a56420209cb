//! Stockroom web - product management application.
//!
//! This binary serves the product management app on port 8080.
//!
//! # Architecture
//!
//! - Axum web framework with server-rendered Askama pages
//! - SQLite for users and products
//! - Cookie sessions backed by the same SQLite database
//!
//! On startup the binary runs pending migrations and seeds the default
//! login and catalog into empty tables, so a fresh checkout serves a
//! usable store.

#![cfg_attr(not(test), forbid(unsafe_code))]

use stockroom_web::config::AppConfig;
use stockroom_web::services::auth::Argon2PasswordHasher;
use stockroom_web::state::AppState;
use stockroom_web::{db, seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockroom_web=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Run pending migrations so a fresh database is usable immediately
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations applied");

    // Seed the default login and catalog into empty tables
    let hasher = Argon2PasswordHasher;
    let report = seed::run(&pool, &hasher, &config.seed_password)
        .await
        .expect("Failed to seed database");
    if report.users_created > 0 || report.products_created > 0 {
        tracing::info!(
            "Seeded {} user(s) and {} product(s)",
            report.users_created,
            report.products_created
        );
    }

    // Build application state
    let state = AppState::new(config.clone(), pool, hasher);

    // Build router (the session store prepares its table here)
    let app = stockroom_web::app(state)
        .await
        .expect("Failed to build application");

    // Start server
    let addr = config.socket_addr();
    tracing::info!("stockroom web listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
