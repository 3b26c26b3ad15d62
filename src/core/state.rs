//! Server state: shared handles for every request handler.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionService;
use crate::core::{Config, ServerError};
use crate::db::{DbService, repository::gebruiker};
use crate::media::ImageNormalizer;

/// Shared server state.
///
/// Cloning is cheap: the pool is internally reference-counted and the
/// session service sits behind an `Arc`.
///
/// | Field | Description |
/// |------|------|
/// | config | immutable configuration |
/// | db | SQLite pool + migrations |
/// | sessions | signed session tokens |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub sessions: Arc<SessionService>,
}

impl ServerState {
    /// Initialize all services: open the database, apply migrations and
    /// make sure the single admin account exists.
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let db = DbService::new(&config.database_url)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        gebruiker::ensure_seed_account(
            &db.pool,
            &config.beheerder_gebruikersnaam,
            config.beheerder_wachtwoord.as_deref(),
        )
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;

        let sessions = Arc::new(SessionService::new(&config.session_secret));

        Ok(Self {
            config: config.clone(),
            db,
            sessions,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.upload_dir)
    }

    /// Image normalizer configured from the current settings.
    pub fn normalizer(&self) -> ImageNormalizer {
        ImageNormalizer::new(
            self.upload_dir(),
            self.config.max_image_dim,
            self.config.jpeg_quality,
        )
    }
}
