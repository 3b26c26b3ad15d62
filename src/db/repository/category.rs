//! Category repository: the slug resolver

use sqlx::SqlitePool;

use super::RepoResult;
use crate::db::models::Categorie;

/// All categories, stable order.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Categorie>> {
    let rows = sqlx::query_as::<_, Categorie>("SELECT id, naam FROM categorieen ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Categorie>> {
    let row = sqlx::query_as::<_, Categorie>("SELECT id, naam FROM categorieen WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Resolve a URL slug to a category, case-insensitively.
///
/// Exact match only: no fuzzy matching, no stripping of spaces or
/// punctuation.
pub async fn resolve_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Categorie>> {
    let row = sqlx::query_as::<_, Categorie>(
        "SELECT id, naam FROM categorieen WHERE LOWER(naam) = LOWER(?)",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
