//! Catalog item and color-variant models
//!
//! Row models (`FromRow`) plus the typed boundary DTOs the form layer
//! builds once per request. Variant image slots are an explicit enum so
//! "keep the stored file" and "replace with this upload" can never be
//! confused.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable catalog item (a row in `producten` or `kettingen`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogItem {
    pub id: i64,
    pub naam: String,
    pub beschrijving: String,
    /// Stored as canonical decimal text; parsed/validated at the boundary
    pub prijs: String,
    pub categorie_id: Option<i64>,
    /// Unix millis; immutable, drives the most-recent-first listing order
    pub aangemaakt_op: i64,
}

/// One color option of a catalog item, with its own image pair.
///
/// The parent column (`product_id`/`ketting_id`) is selected under the
/// `item_id` alias so both variant tables share this model.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct KleurVariant {
    pub id: i64,
    pub item_id: i64,
    pub kleur_naam: String,
    /// Primary image filename (bare, relative to the uploads directory)
    pub foto: String,
    /// Hover image filename
    pub hover_foto: String,
}

/// Denormalized display view: parent fields plus ordered variants.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItemView {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub kleuren: Vec<KleurVariant>,
}

// ── Boundary DTOs ───────────────────────────────────────────────────

/// Validated item fields for a create or edit.
#[derive(Debug, Clone)]
pub struct ItemFields {
    pub naam: String,
    pub beschrijving: String,
    pub prijs: Decimal,
    pub categorie_id: Option<i64>,
}

/// One image slot of a variant descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSlot {
    /// New upload to normalize and store
    Upload(Vec<u8>),
    /// Carry a previously stored filename forward unchanged
    Keep(String),
    /// Nothing submitted for this slot
    Empty,
}

impl ImageSlot {
    pub fn is_present(&self) -> bool {
        match self {
            ImageSlot::Upload(data) => !data.is_empty(),
            ImageSlot::Keep(naam) => !naam.is_empty(),
            ImageSlot::Empty => false,
        }
    }
}

/// One submitted variant, built once at the form boundary.
#[derive(Debug, Clone)]
pub struct VariantDescriptor {
    pub kleur_naam: String,
    pub foto: ImageSlot,
    pub hover_foto: ImageSlot,
}

impl VariantDescriptor {
    /// A descriptor only counts when it has a name and both images.
    /// Incomplete descriptors are skipped, never partially stored;
    /// sparse/padded form submissions are expected.
    pub fn is_complete(&self) -> bool {
        !self.kleur_naam.trim().is_empty()
            && self.foto.is_present()
            && self.hover_foto.is_present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(naam: &str, foto: ImageSlot, hover: ImageSlot) -> VariantDescriptor {
        VariantDescriptor {
            kleur_naam: naam.to_string(),
            foto,
            hover_foto: hover,
        }
    }

    #[test]
    fn complete_needs_name_and_both_images() {
        let upload = ImageSlot::Upload(vec![1, 2, 3]);
        assert!(descriptor("Goud", upload.clone(), upload.clone()).is_complete());
        assert!(!descriptor("", upload.clone(), upload.clone()).is_complete());
        assert!(!descriptor("  ", upload.clone(), upload.clone()).is_complete());
        assert!(!descriptor("Goud", upload.clone(), ImageSlot::Empty).is_complete());
        assert!(!descriptor("Goud", ImageSlot::Empty, upload).is_complete());
    }

    #[test]
    fn kept_filename_counts_as_present() {
        let keep = ImageSlot::Keep("ab12cd34ef56ab78.jpg".into());
        let upload = ImageSlot::Upload(vec![1]);
        assert!(descriptor("Zilver", keep.clone(), upload).is_complete());
        assert!(!descriptor("Zilver", ImageSlot::Keep(String::new()), keep).is_complete());
    }

    #[test]
    fn empty_upload_bytes_are_absent() {
        assert!(!ImageSlot::Upload(vec![]).is_present());
        assert!(!ImageSlot::Empty.is_present());
    }
}
