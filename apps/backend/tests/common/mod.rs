//! Common test utilities and fixtures for integration tests.
//!
//! # Requirements
//! Tests marked `#[ignore = "requires database"]` need a PostgreSQL
//! database (set DATABASE_URL). Backups are disabled in every context.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use vocab_trainer_backend::config::Config;
use vocab_trainer_backend::db::Database;
use vocab_trainer_backend::{build_router, AppState};

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a context backed by the database at DATABASE_URL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_database(db, &database_url)
    }

    /// Create a context whose pool never connects unless a handler queries.
    ///
    /// Only routes that answer before touching the database work here.
    pub fn offline() -> Self {
        let database_url = "postgres://localhost/vocab_offline";
        let db = Database::connect_lazy(database_url).expect("Failed to build lazy pool");
        Self::with_database(db, database_url)
    }

    fn with_database(db: Database, database_url: &str) -> Self {
        let state = AppState::new(db, None, Config::for_database(database_url));
        let db = state.db.clone();
        Self {
            db,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Create a test device and return its ID and token.
    pub async fn create_test_device(&self, name: Option<&str>) -> (Uuid, String) {
        let device = self
            .db
            .create_device(name)
            .await
            .expect("Failed to create test device");
        (device.id, device.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Remove a device; its words and backups cascade.
    pub async fn cleanup_device(&self, device_id: Uuid) {
        let _ = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(device_id)
            .execute(self.db.pool())
            .await;
    }
}
