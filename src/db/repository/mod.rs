//! Repository Module
//!
//! CRUD operations on the SQLite schema. Functions take the pool
//! directly, in the `member.rs` style: no per-table structs, just
//! module-level functions.

pub mod catalog;
pub mod category;
pub mod gebruiker;

pub use catalog::{CatalogTables, KETTINGEN, PRODUCTEN};

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Niet gevonden: {0}")]
    NotFound(String),

    #[error("Databasefout: {0}")]
    Database(String),

    #[error("Validatiefout: {0}")]
    Validation(String),

    /// Image normalization failure inside a variant write; aborts the
    /// whole write, same as a storage failure
    #[error("Afbeeldingsfout: {0}")]
    Image(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
