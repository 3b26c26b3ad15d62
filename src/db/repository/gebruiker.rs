//! Admin account repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::Gebruiker;

const GEBRUIKER_COLUMNS: &str = "id, gebruikersnaam, wachtwoord_hash";

pub async fn find_by_gebruikersnaam(
    pool: &SqlitePool,
    gebruikersnaam: &str,
) -> RepoResult<Option<Gebruiker>> {
    let sql = format!("SELECT {GEBRUIKER_COLUMNS} FROM gebruikers WHERE gebruikersnaam = ? LIMIT 1");
    let row = sqlx::query_as::<_, Gebruiker>(&sql)
        .bind(gebruikersnaam)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Gebruiker>> {
    let sql = format!("SELECT {GEBRUIKER_COLUMNS} FROM gebruikers WHERE id = ?");
    let row = sqlx::query_as::<_, Gebruiker>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn update_gebruikersnaam(
    pool: &SqlitePool,
    id: i64,
    gebruikersnaam: &str,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE gebruikers SET gebruikersnaam = ? WHERE id = ?")
        .bind(gebruikersnaam)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Gebruiker {id} niet gevonden")));
    }
    Ok(())
}

pub async fn update_wachtwoord_hash(pool: &SqlitePool, id: i64, hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE gebruikers SET wachtwoord_hash = ? WHERE id = ?")
        .bind(hash)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Gebruiker {id} niet gevonden")));
    }
    Ok(())
}

/// Seed the single admin account if the table is empty.
///
/// Not an account-creation flow: this only ever runs on a fresh database,
/// so the one expected row pre-exists before the first request.
pub async fn ensure_seed_account(
    pool: &SqlitePool,
    gebruikersnaam: &str,
    wachtwoord: Option<&str>,
) -> RepoResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gebruikers")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let Some(wachtwoord) = wachtwoord else {
        return Err(RepoError::Validation(
            "Lege gebruikers-tabel en geen BEHEERDER_WACHTWOORD gezet".into(),
        ));
    };

    let hash = Gebruiker::hash_password(wachtwoord)
        .map_err(|e| RepoError::Database(format!("Wachtwoord hashen mislukt: {e}")))?;
    sqlx::query("INSERT INTO gebruikers (gebruikersnaam, wachtwoord_hash) VALUES (?, ?)")
        .bind(gebruikersnaam)
        .bind(&hash)
        .execute(pool)
        .await?;
    tracing::info!(gebruikersnaam, "Beheerder-account aangemaakt");
    Ok(())
}
