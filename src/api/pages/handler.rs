//! Public page handlers
//!
//! Views are served as denormalized JSON objects; a missing item or
//! category surfaces as a redirect with a notice, never a bare error.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{CatalogItemView, Categorie};
use crate::db::repository::{PRODUCTEN, catalog, category};
use crate::utils::{AppError, AppResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Notice carried on redirects (e.g. "Product niet gevonden")
    pub melding: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub categorieen: Vec<Categorie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub melding: Option<String>,
}

/// GET /: home: the category index
pub async fn home(
    State(state): State<ServerState>,
    Query(query): Query<HomeQuery>,
) -> AppResult<Json<AppResponse<HomeView>>> {
    let categorieen = category::find_all(state.pool()).await?;
    Ok(Json(AppResponse::success(HomeView {
        categorieen,
        melding: query.melding,
    })))
}

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub winkel: &'static str,
    pub email: &'static str,
}

/// GET /contact: static contact page
pub async fn contact() -> Json<AppResponse<ContactView>> {
    Json(AppResponse::success(ContactView {
        winkel: "Sieraad",
        email: "info@sieraad.nl",
    }))
}

#[derive(Debug, Serialize)]
pub struct LijstView {
    pub categorie: Categorie,
    pub items: Vec<CatalogItemView>,
}

/// GET /producten/{categorie}: items in a category, most recent first
pub async fn lijst(
    State(state): State<ServerState>,
    Path(categorie): Path<String>,
) -> AppResult<Json<AppResponse<LijstView>>> {
    let categorie = category::resolve_slug(state.pool(), &categorie)
        .await?
        .ok_or_else(|| AppError::not_found("Categorie niet gevonden"))?;

    let items = catalog::list_by_categorie(state.pool(), &PRODUCTEN, categorie.id).await?;
    Ok(Json(AppResponse::success(LijstView { categorie, items })))
}

#[derive(Debug, Serialize)]
pub struct DetailView {
    pub categorie: Categorie,
    #[serde(flatten)]
    pub item: CatalogItemView,
}

/// GET /producten/{categorie}/{id}: item detail with ordered variants
pub async fn detail(
    State(state): State<ServerState>,
    Path((categorie, id)): Path<(String, i64)>,
) -> AppResult<Json<AppResponse<DetailView>>> {
    let categorie = category::resolve_slug(state.pool(), &categorie)
        .await?
        .ok_or_else(|| AppError::not_found("Categorie niet gevonden"))?;

    let item = catalog::find_view(state.pool(), &PRODUCTEN, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product niet gevonden"))?;

    Ok(Json(AppResponse::success(DetailView { categorie, item })))
}
