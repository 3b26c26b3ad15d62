//! Category model

use serde::{Deserialize, Serialize};

/// A shop category; `naam` doubles as the URL slug, matched
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Categorie {
    pub id: i64,
    pub naam: String,
}

impl Categorie {
    /// Path of this category's public listing.
    pub fn listing_path(&self) -> String {
        format!("/producten/{}", self.naam.to_lowercase())
    }
}
