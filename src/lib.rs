pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod flash;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod schedule;
pub mod security;
pub mod services;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use config::{Config, DEFAULT_SECRET_KEY};
use database::Database;
use security::{Csrf, Signer};

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub signer: Signer,
    pub csrf: Csrf,
}

impl AppState {
    /// Connects to the database and brings its schema up to date.
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let db = Database::new(&config.database.url(), config.database.pool_size).await?;
        info!("Database connected");

        db.run_migrations().await?;

        Ok(Self::with_database(config, db))
    }

    pub fn with_database(config: Config, db: Database) -> Arc<Self> {
        if config.security.secret_key == DEFAULT_SECRET_KEY && !config.is_development() {
            warn!("SECRET_KEY is the built-in development key; set SECRET_KEY for {}", config.app.environment);
        }

        let db = db.with_track_modifications(config.database.track_modifications);
        let signer = Signer::new(&config.security.secret_key);
        let csrf = Csrf::new(signer.clone(), &config.security);

        Arc::new(Self {
            db,
            config,
            signer,
            csrf,
        })
    }
}

/// Every route, with request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
