//! Product administration handlers
//!
//! Create and edit accept `multipart/form-data`; the form boundary builds
//! typed variant descriptors once and the repository enforces the
//! all-or-nothing parent+variants write. Successful mutations redirect the
//! way the original back-office did: create/edit to the category listing,
//! delete to the home page.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    response::Redirect,
};
use serde::Serialize;

use crate::api::forms;
use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::models::{CatalogItemView, Categorie};
use crate::db::repository::{PRODUCTEN, catalog, category};
use crate::utils::{AppError, AppResponse, AppResult};

/// Redirect target after a successful create/edit: the listing of the
/// item's category, or home when the item has none.
async fn listing_redirect(state: &ServerState, categorie_id: Option<i64>) -> AppResult<Redirect> {
    let categorie = match categorie_id {
        Some(id) => category::find_by_id(state.pool(), id).await?,
        None => None,
    };
    Ok(match categorie {
        Some(c) => Redirect::to(&c.listing_path()),
        None => Redirect::to("/"),
    })
}

#[derive(Debug, Serialize)]
pub struct ToevoegenFormView {
    pub categorieen: Vec<Categorie>,
}

/// GET /producten/toevoegen: form metadata (category choices)
pub async fn toevoegen_form(
    State(state): State<ServerState>,
    Extension(_beheerder): Extension<CurrentAdmin>,
) -> AppResult<Json<AppResponse<ToevoegenFormView>>> {
    let categorieen = category::find_all(state.pool()).await?;
    Ok(Json(AppResponse::success(ToevoegenFormView { categorieen })))
}

/// POST /producten/toevoegen: create an item with its variant set
pub async fn toevoegen(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let form = forms::parse_item_form(multipart).await?;
    let fields = form.fields(state.config.allow_non_positive_prices)?;

    let normalizer = state.normalizer();
    let item_id = catalog::create_with_variants(
        state.pool(),
        &PRODUCTEN,
        &fields,
        &form.varianten,
        &normalizer,
    )
    .await?;

    tracing::info!(
        item_id,
        naam = %fields.naam,
        beheerder = %beheerder.gebruikersnaam,
        "Product toegevoegd"
    );
    listing_redirect(&state, fields.categorie_id).await
}

#[derive(Debug, Serialize)]
pub struct BewerkenFormView {
    #[serde(flatten)]
    pub item: CatalogItemView,
    pub categorieen: Vec<Categorie>,
}

/// GET /producten/bewerken/{id}: current item state for the edit form
pub async fn bewerken_form(
    State(state): State<ServerState>,
    Extension(_beheerder): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<BewerkenFormView>>> {
    let item = catalog::find_view(state.pool(), &PRODUCTEN, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product niet gevonden"))?;
    let categorieen = category::find_all(state.pool()).await?;
    Ok(Json(AppResponse::success(BewerkenFormView {
        item,
        categorieen,
    })))
}

/// POST /producten/bewerken/{id}: full variant-set replacement
pub async fn bewerken(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let form = forms::parse_item_form(multipart).await?;
    let fields = form.fields(state.config.allow_non_positive_prices)?;

    let normalizer = state.normalizer();
    catalog::replace_with_variants(
        state.pool(),
        &PRODUCTEN,
        id,
        &fields,
        &form.varianten,
        &normalizer,
    )
    .await?;

    tracing::info!(
        item_id = id,
        naam = %fields.naam,
        beheerder = %beheerder.gebruikersnaam,
        "Product bewerkt"
    );
    listing_redirect(&state, fields.categorie_id).await
}

/// POST /producten/verwijderen/{id}: variants first, then the item
pub async fn verwijderen(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    catalog::delete_with_variants(state.pool(), &PRODUCTEN, id).await?;

    tracing::info!(
        item_id = id,
        beheerder = %beheerder.gebruikersnaam,
        "Product verwijderd"
    );
    Ok(Redirect::to("/"))
}
