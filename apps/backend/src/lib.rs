pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::dates::study_day;
use vocab_core::{OfflineGenerator, SessionSelector, StreakWeight, TextGenerator};

use crate::config::Config;
use crate::db::Database;
use crate::services::storage::StorageService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// Absent when no S3 credentials are configured.
    pub storage: Option<Arc<StorageService>>,
    pub config: Arc<Config>,
    pub generator: Arc<dyn TextGenerator>,
    /// Serializes read-modify-write cycles on stored collections.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: Database, storage: Option<StorageService>, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            storage: storage.map(Arc::new),
            config: Arc::new(config),
            generator: Arc::new(OfflineGenerator),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current study day, shifted by the configured reset hour.
    pub fn today(&self) -> NaiveDate {
        study_day(self.config.daily_reset_hour)
    }

    pub fn algorithm(&self) -> StreakWeight {
        StreakWeight::from(&self.config.engine)
    }

    pub fn selector(&self) -> SessionSelector {
        SessionSelector::from(&self.config.engine)
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Device routes
        .route("/api/device/status", get(routes::device::status))
        // Word routes
        .route("/api/words", get(routes::words::list))
        .route("/api/words/import", post(routes::words::import))
        .route("/api/words/reset", post(routes::words::reset_all))
        .route(
            "/api/words/:id",
            put(routes::words::update).delete(routes::words::delete),
        )
        .route("/api/words/:id/reset", post(routes::words::reset_one))
        .route("/api/words/:id/options", get(routes::words::options))
        // Session routes
        .route("/api/session", post(routes::session::start))
        .route("/api/session/custom", post(routes::session::custom))
        .route("/api/session/answer", post(routes::session::answer))
        .route("/api/session/summary", post(routes::session::summary))
        // Stats and settings
        .route("/api/stats", get(routes::stats::stats))
        .route("/api/settings", get(routes::stats::settings))
        // Export routes
        .route("/api/export", get(routes::export::download))
        .route("/api/export/backup", post(routes::export::backup))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/device/register", post(routes::device::register))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let storage = match StorageService::from_env() {
        Ok(storage) => Some(storage),
        Err(e) => {
            tracing::warn!("Backups disabled: {}", e);
            None
        }
    };

    let addr = config.bind_addr();
    let app = build_router(AppState::new(db, storage, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
