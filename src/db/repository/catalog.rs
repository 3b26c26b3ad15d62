//! Catalog repository: the variant-set writer and catalog reader
//!
//! The writer enforces the parent+variants invariants:
//!
//! - a create only persists when at least one complete variant descriptor
//!   (name + both images) is present; incomplete descriptors are skipped,
//!   never partially stored;
//! - an edit replaces the entire variant set (delete all, insert new), no
//!   partial patches;
//! - every multi-row write runs in one transaction; any failure, SQL and
//!   image normalization alike, rolls the whole write back. Image files already
//!   written before the failure are an accepted leak.
//!
//! Both parent/variant table pairs (`producten`/`product_kleuren` and the
//! legacy `kettingen`/`ketting_kleuren`) go through the same functions via
//! a [`CatalogTables`] descriptor.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{CatalogItem, CatalogItemView, ImageSlot, ItemFields, KleurVariant, VariantDescriptor};
use crate::media::ImageNormalizer;
use crate::utils::now_millis;

/// A parent/variant table pair.
#[derive(Debug, Clone, Copy)]
pub struct CatalogTables {
    pub parent: &'static str,
    pub variant: &'static str,
    pub parent_fk: &'static str,
}

pub const PRODUCTEN: CatalogTables = CatalogTables {
    parent: "producten",
    variant: "product_kleuren",
    parent_fk: "product_id",
};

pub const KETTINGEN: CatalogTables = CatalogTables {
    parent: "kettingen",
    variant: "ketting_kleuren",
    parent_fk: "ketting_id",
};

const ITEM_COLUMNS: &str = "id, naam, beschrijving, prijs, categorie_id, aangemaakt_op";

// ── Reader ──────────────────────────────────────────────────────────

pub async fn find_by_id(
    pool: &SqlitePool,
    t: &CatalogTables,
    id: i64,
) -> RepoResult<Option<CatalogItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM {} WHERE id = ?", t.parent);
    let item = sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Variants for an item, in insertion order (generated id ascending).
pub async fn find_variants(
    pool: &SqlitePool,
    t: &CatalogTables,
    item_id: i64,
) -> RepoResult<Vec<KleurVariant>> {
    let sql = format!(
        "SELECT id, {fk} AS item_id, kleur_naam, foto, hover_foto FROM {} WHERE {fk} = ? ORDER BY id ASC",
        t.variant,
        fk = t.parent_fk
    );
    let kleuren = sqlx::query_as::<_, KleurVariant>(&sql)
        .bind(item_id)
        .fetch_all(pool)
        .await?;
    Ok(kleuren)
}

/// Denormalized display view: item plus its ordered variants.
pub async fn find_view(
    pool: &SqlitePool,
    t: &CatalogTables,
    id: i64,
) -> RepoResult<Option<CatalogItemView>> {
    let Some(item) = find_by_id(pool, t, id).await? else {
        return Ok(None);
    };
    let kleuren = find_variants(pool, t, id).await?;
    Ok(Some(CatalogItemView { item, kleuren }))
}

/// Items in a category, most recent first, each with its variants.
pub async fn list_by_categorie(
    pool: &SqlitePool,
    t: &CatalogTables,
    categorie_id: i64,
) -> RepoResult<Vec<CatalogItemView>> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM {} WHERE categorie_id = ? ORDER BY aangemaakt_op DESC, id DESC",
        t.parent
    );
    let items = sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(categorie_id)
        .fetch_all(pool)
        .await?;

    let mut views = Vec::with_capacity(items.len());
    for item in items {
        let kleuren = find_variants(pool, t, item.id).await?;
        views.push(CatalogItemView { item, kleuren });
    }
    Ok(views)
}

// ── Writer ──────────────────────────────────────────────────────────

/// Resolve an image slot to a stored filename.
///
/// Uploads are normalized on the spot; a normalization failure aborts the
/// enclosing write (the caller's open transaction rolls back on drop).
fn resolve_slot(slot: &ImageSlot, normalizer: &ImageNormalizer) -> RepoResult<String> {
    match slot {
        ImageSlot::Keep(naam) => Ok(naam.clone()),
        ImageSlot::Upload(data) => normalizer
            .normalize(data)
            .ok_or_else(|| RepoError::Image("Afbeelding kon niet worden opgeslagen".into())),
        ImageSlot::Empty => Err(RepoError::Validation(
            "Kleurvariant mist een afbeelding".into(),
        )),
    }
}

fn complete_variants(descriptors: &[VariantDescriptor]) -> RepoResult<Vec<&VariantDescriptor>> {
    let compleet: Vec<&VariantDescriptor> =
        descriptors.iter().filter(|d| d.is_complete()).collect();
    if compleet.is_empty() {
        return Err(RepoError::Validation(
            "Minstens één kleurvariant met naam en beide foto's is vereist".into(),
        ));
    }
    Ok(compleet)
}

/// Create a catalog item with its variant set.
///
/// Inserts the parent, then normalizes and inserts every complete variant
/// in input order, all inside one transaction. Returns the new item id.
pub async fn create_with_variants(
    pool: &SqlitePool,
    t: &CatalogTables,
    fields: &ItemFields,
    descriptors: &[VariantDescriptor],
    normalizer: &ImageNormalizer,
) -> RepoResult<i64> {
    let compleet = complete_variants(descriptors)?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let insert_parent = format!(
        "INSERT INTO {} (naam, beschrijving, prijs, categorie_id, aangemaakt_op) VALUES (?, ?, ?, ?, ?)",
        t.parent
    );
    let result = sqlx::query(&insert_parent)
        .bind(&fields.naam)
        .bind(&fields.beschrijving)
        .bind(fields.prijs.to_string())
        .bind(fields.categorie_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    let item_id = result.last_insert_rowid();

    insert_variant_set(&mut tx, t, item_id, &compleet, normalizer).await?;

    tx.commit().await?;
    tracing::info!(
        tabel = t.parent,
        item_id,
        varianten = compleet.len(),
        "Catalog item created"
    );
    Ok(item_id)
}

/// Replace a catalog item's fields and entire variant set.
///
/// Validation happens before any statement runs: an edit with zero
/// complete variants leaves the stored set untouched. The replacement
/// itself (update parent, delete all old variants, insert the new set) is
/// one transaction.
pub async fn replace_with_variants(
    pool: &SqlitePool,
    t: &CatalogTables,
    id: i64,
    fields: &ItemFields,
    descriptors: &[VariantDescriptor],
    normalizer: &ImageNormalizer,
) -> RepoResult<()> {
    let compleet = complete_variants(descriptors)?;

    let mut tx = pool.begin().await?;

    let update_parent = format!(
        "UPDATE {} SET naam = ?, beschrijving = ?, prijs = ?, categorie_id = ? WHERE id = ?",
        t.parent
    );
    let result = sqlx::query(&update_parent)
        .bind(&fields.naam)
        .bind(&fields.beschrijving)
        .bind(fields.prijs.to_string())
        .bind(fields.categorie_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} niet gevonden")));
    }

    let delete_variants = format!("DELETE FROM {} WHERE {} = ?", t.variant, t.parent_fk);
    sqlx::query(&delete_variants)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_variant_set(&mut tx, t, id, &compleet, normalizer).await?;

    tx.commit().await?;
    tracing::info!(
        tabel = t.parent,
        item_id = id,
        varianten = compleet.len(),
        "Catalog item updated, variant set replaced"
    );
    Ok(())
}

/// Delete a catalog item and its variants: variants first, then the
/// parent, in one transaction. Cascade is deliberately not left to the
/// storage engine.
pub async fn delete_with_variants(pool: &SqlitePool, t: &CatalogTables, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let delete_variants = format!("DELETE FROM {} WHERE {} = ?", t.variant, t.parent_fk);
    sqlx::query(&delete_variants)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let delete_parent = format!("DELETE FROM {} WHERE id = ?", t.parent);
    let result = sqlx::query(&delete_parent)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} niet gevonden")));
    }

    tx.commit().await?;
    tracing::info!(tabel = t.parent, item_id = id, "Catalog item deleted");
    Ok(())
}

async fn insert_variant_set(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    t: &CatalogTables,
    item_id: i64,
    varianten: &[&VariantDescriptor],
    normalizer: &ImageNormalizer,
) -> RepoResult<()> {
    let insert_variant = format!(
        "INSERT INTO {} ({}, kleur_naam, foto, hover_foto) VALUES (?, ?, ?, ?)",
        t.variant, t.parent_fk
    );
    for d in varianten {
        let foto = resolve_slot(&d.foto, normalizer)?;
        let hover_foto = resolve_slot(&d.hover_foto, normalizer)?;
        sqlx::query(&insert_variant)
            .bind(item_id)
            .bind(d.kleur_naam.trim())
            .bind(&foto)
            .bind(&hover_foto)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
