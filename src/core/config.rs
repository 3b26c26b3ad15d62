//! Server configuration
//!
//! All settings come from the environment, read once at process start.
//!
//! | Environment variable | Default | Description |
//! |----------|--------|------|
//! | DATABASE_URL | (required) | SQLite URL, e.g. `sqlite:winkel.db` |
//! | SESSION_SECRET | (required) | session token signing secret |
//! | HTTP_PORT | 3000 | HTTP port |
//! | UPLOAD_DIR | uploads | normalized image directory |
//! | MAX_IMAGE_DIM | 800 | image bounding box (both dimensions) |
//! | JPEG_QUALITY | 85 | re-encoding quality (0-100) |
//! | ALLOW_NON_POSITIVE_PRICES | true | accept zero/negative prices |
//! | BEHEERDER_GEBRUIKERSNAAM | beheerder | seeded admin username |
//! | BEHEERDER_WACHTWOORD | (none) | seeded admin password |
//!
//! A missing `DATABASE_URL` or `SESSION_SECRET` is a startup failure,
//! never a per-request one.

use crate::core::ServerError;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Session token signing secret
    pub session_secret: String,
    /// HTTP API port
    pub http_port: u16,
    /// Directory for normalized upload files
    pub upload_dir: String,
    /// Bounding box applied to uploaded images
    pub max_image_dim: u32,
    /// JPEG re-encoding quality
    pub jpeg_quality: u8,
    /// Price policy: whether zero/negative prices pass validation
    pub allow_non_positive_prices: bool,
    /// Username for the seeded admin account
    pub beheerder_gebruikersnaam: String,
    /// Password for the seeded admin account (only used when the
    /// gebruikers table is empty)
    pub beheerder_wachtwoord: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required variables missing → `ServerError::Config`.
    pub fn from_env() -> Result<Self, ServerError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ServerError::Config("DATABASE_URL is not set".into()))?;
        let session_secret = std::env::var("SESSION_SECRET")
            .map_err(|_| ServerError::Config("SESSION_SECRET is not set".into()))?;
        if session_secret.len() < 16 {
            return Err(ServerError::Config(
                "SESSION_SECRET must be at least 16 bytes".into(),
            ));
        }

        Ok(Self {
            database_url,
            session_secret,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            max_image_dim: std::env::var("MAX_IMAGE_DIM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            jpeg_quality: std::env::var("JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(85),
            allow_non_positive_prices: std::env::var("ALLOW_NON_POSITIVE_PRICES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            beheerder_gebruikersnaam: std::env::var("BEHEERDER_GEBRUIKERSNAAM")
                .unwrap_or_else(|_| "beheerder".into()),
            beheerder_wachtwoord: std::env::var("BEHEERDER_WACHTWOORD").ok(),
        })
    }

    /// Config with explicit values, for tests.
    pub fn with_overrides(
        database_url: impl Into<String>,
        session_secret: impl Into<String>,
        upload_dir: impl Into<String>,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            session_secret: session_secret.into(),
            http_port: 0,
            upload_dir: upload_dir.into(),
            max_image_dim: 800,
            jpeg_quality: 85,
            allow_non_positive_prices: true,
            beheerder_gebruikersnaam: "beheerder".into(),
            beheerder_wachtwoord: None,
        }
    }
}
