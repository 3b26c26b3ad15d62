//! Multipart form boundary
//!
//! The add/edit forms submit parallel repeated fields (`kleur_naam`,
//! `foto`, `hover_foto`, plus the `bestaande_*` carry-forward fields on
//! edit). This module reads the multipart stream once and builds typed
//! [`VariantDescriptor`] values; everything past this boundary works with
//! whole descriptors, so uneven field counts can never cause
//! index-out-of-range access.

use axum::extract::Multipart;
use rust_decimal::Decimal;

use crate::db::models::{ImageSlot, ItemFields, VariantDescriptor};
use crate::utils::validation::{
    MAX_BESCHRIJVING_LEN, MAX_NAAM_LEN, parse_prijs, validate_required_text,
};
use crate::utils::AppError;

/// Raw submitted item form, one typed value per field.
#[derive(Debug, Default)]
pub struct ItemForm {
    pub naam: String,
    pub beschrijving: String,
    pub prijs: String,
    pub categorie_id: Option<i64>,
    pub varianten: Vec<VariantDescriptor>,
}

impl ItemForm {
    /// Validate the item fields and parse the price under the configured
    /// policy. Variant-set validation happens in the writer.
    pub fn fields(&self, allow_non_positive_prices: bool) -> Result<ItemFields, AppError> {
        validate_required_text(&self.naam, "Naam", MAX_NAAM_LEN)?;
        if self.beschrijving.len() > MAX_BESCHRIJVING_LEN {
            return Err(AppError::validation("Beschrijving is te lang"));
        }
        let prijs: Decimal = parse_prijs(&self.prijs, allow_non_positive_prices)?;
        Ok(ItemFields {
            naam: self.naam.trim().to_string(),
            beschrijving: self.beschrijving.trim().to_string(),
            prijs,
            categorie_id: self.categorie_id,
        })
    }
}

/// Read the whole multipart stream into an [`ItemForm`].
pub async fn parse_item_form(mut multipart: Multipart) -> Result<ItemForm, AppError> {
    let mut form = ItemForm::default();

    let mut kleur_namen: Vec<String> = Vec::new();
    let mut fotos: Vec<Vec<u8>> = Vec::new();
    let mut hover_fotos: Vec<Vec<u8>> = Vec::new();
    let mut bestaande_fotos: Vec<String> = Vec::new();
    let mut bestaande_hover_fotos: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(naam) = field.name().map(str::to_string) else {
            continue;
        };
        match naam.as_str() {
            "naam" => form.naam = field.text().await?,
            "beschrijving" => form.beschrijving = field.text().await?,
            "prijs" => form.prijs = field.text().await?,
            "categorie_id" => {
                form.categorie_id = field.text().await?.trim().parse().ok();
            }
            "kleur_naam" => kleur_namen.push(field.text().await?),
            "foto" => fotos.push(field.bytes().await?.to_vec()),
            "hover_foto" => hover_fotos.push(field.bytes().await?.to_vec()),
            "bestaande_foto" => bestaande_fotos.push(field.text().await?),
            "bestaande_hover_foto" => bestaande_hover_fotos.push(field.text().await?),
            _ => {}
        }
    }

    form.varianten = zip_varianten(
        kleur_namen,
        fotos,
        hover_fotos,
        bestaande_fotos,
        bestaande_hover_fotos,
    );
    Ok(form)
}

/// Combine the parallel field lists into descriptors, padding short lists
/// with empty slots instead of indexing past their end.
fn zip_varianten(
    kleur_namen: Vec<String>,
    fotos: Vec<Vec<u8>>,
    hover_fotos: Vec<Vec<u8>>,
    bestaande_fotos: Vec<String>,
    bestaande_hover_fotos: Vec<String>,
) -> Vec<VariantDescriptor> {
    let n = kleur_namen
        .len()
        .max(fotos.len())
        .max(hover_fotos.len())
        .max(bestaande_fotos.len())
        .max(bestaande_hover_fotos.len());

    (0..n)
        .map(|i| VariantDescriptor {
            kleur_naam: kleur_namen.get(i).cloned().unwrap_or_default(),
            foto: slot(fotos.get(i), bestaande_fotos.get(i)),
            hover_foto: slot(hover_fotos.get(i), bestaande_hover_fotos.get(i)),
        })
        .collect()
}

/// A fresh upload wins over a carried-forward filename; neither present
/// leaves the slot empty.
fn slot(upload: Option<&Vec<u8>>, bestaand: Option<&String>) -> ImageSlot {
    match upload {
        Some(data) if !data.is_empty() => ImageSlot::Upload(data.clone()),
        _ => match bestaand {
            Some(naam) if !naam.is_empty() => ImageSlot::Keep(naam.clone()),
            _ => ImageSlot::Empty,
        },
    }
}
