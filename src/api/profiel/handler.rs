//! Admin profile handlers
//!
//! Username and password edits answer in JSON (the profile page edits
//! in-place). A username change re-issues the session cookie so the
//! carried name stays current.

use axum::{
    Extension, Json,
    extract::{Form, State},
    response::AppendHeaders,
};
use http::header::SET_COOKIE;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentAdmin, SessionService};
use crate::core::ServerState;
use crate::db::repository::gebruiker;
use crate::utils::validation::{
    MAX_GEBRUIKERSNAAM_LEN, MAX_WACHTWOORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult};
use crate::db::models::Gebruiker;

#[derive(Debug, Serialize)]
pub struct ProfielView {
    pub id: i64,
    pub gebruikersnaam: String,
}

/// GET /profiel: fresh profile data for the signed-in admin
pub async fn profiel(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
) -> AppResult<Json<AppResponse<ProfielView>>> {
    let gebruiker = gebruiker::find_by_id(state.pool(), beheerder.id)
        .await?
        .ok_or_else(|| AppError::not_found("Gebruiker niet gevonden"))?;
    Ok(Json(AppResponse::success(ProfielView {
        id: gebruiker.id,
        gebruikersnaam: gebruiker.gebruikersnaam,
    })))
}

#[derive(Debug, Deserialize)]
pub struct GebruikersnaamForm {
    pub gebruikersnaam: String,
}

/// POST /profiel/gebruikersnaam/bewerken: JSON response
pub async fn wijzig_gebruikersnaam(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
    Form(form): Form<GebruikersnaamForm>,
) -> AppResult<(
    AppendHeaders<[(http::HeaderName, String); 1]>,
    Json<AppResponse<ProfielView>>,
)> {
    let nieuw = form.gebruikersnaam.trim();
    validate_required_text(nieuw, "Gebruikersnaam", MAX_GEBRUIKERSNAAM_LEN)?;

    if let Some(bestaand) = gebruiker::find_by_gebruikersnaam(state.pool(), nieuw).await?
        && bestaand.id != beheerder.id
    {
        return Err(AppError::validation("Gebruikersnaam is al in gebruik"));
    }

    gebruiker::update_gebruikersnaam(state.pool(), beheerder.id, nieuw).await?;

    // Re-issue the session so the cookie carries the new name
    let token = state
        .sessions
        .issue(beheerder.id, nieuw)
        .map_err(|e| AppError::internal(format!("Sessie vernieuwen mislukt: {e}")))?;

    tracing::info!(
        gebruiker_id = beheerder.id,
        oud = %beheerder.gebruikersnaam,
        nieuw = %nieuw,
        "Gebruikersnaam gewijzigd"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, SessionService::session_cookie(&token))]),
        Json(AppResponse::success(ProfielView {
            id: beheerder.id,
            gebruikersnaam: nieuw.to_string(),
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct WachtwoordForm {
    pub huidig_wachtwoord: String,
    pub nieuw_wachtwoord: String,
}

/// POST /profiel/wachtwoord/bewerken: JSON response
pub async fn wijzig_wachtwoord(
    State(state): State<ServerState>,
    Extension(beheerder): Extension<CurrentAdmin>,
    Form(form): Form<WachtwoordForm>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_required_text(&form.nieuw_wachtwoord, "Nieuw wachtwoord", MAX_WACHTWOORD_LEN)?;

    let gebruiker = gebruiker::find_by_id(state.pool(), beheerder.id)
        .await?
        .ok_or_else(|| AppError::not_found("Gebruiker niet gevonden"))?;

    let huidig_ok = gebruiker
        .verify_password(&form.huidig_wachtwoord)
        .map_err(|e| AppError::internal(format!("Wachtwoordverificatie mislukt: {e}")))?;
    if !huidig_ok {
        return Err(AppError::invalid_credentials());
    }

    let hash = Gebruiker::hash_password(&form.nieuw_wachtwoord)
        .map_err(|e| AppError::internal(format!("Wachtwoord hashen mislukt: {e}")))?;
    gebruiker::update_wachtwoord_hash(state.pool(), beheerder.id, &hash).await?;

    tracing::info!(gebruiker_id = beheerder.id, "Wachtwoord gewijzigd");
    Ok(Json(AppResponse::success(())))
}
