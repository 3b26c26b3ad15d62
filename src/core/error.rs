//! Startup-level server errors.
//!
//! Request-level errors are [`crate::utils::AppError`]; this type covers
//! everything that can go wrong before the server accepts traffic.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuratiefout: {0}")]
    Config(String),

    #[error("Databasefout: {0}")]
    Database(String),

    #[error("IO-fout: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for startup paths.
pub type Result<T> = std::result::Result<T, ServerError>;
