//! Login and logout handlers
//!
//! One fixed error message for every failure mode, so a response never
//! reveals whether the username exists.

use std::sync::OnceLock;
use std::time::Duration;

use axum::{
    Extension, Json,
    extract::{Form, State},
    response::{AppendHeaders, Redirect},
};
use http::header::SET_COOKIE;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentAdmin, SessionService};
use crate::core::ServerState;
use crate::db::models::Gebruiker;
use crate::db::repository::gebruiker;
use crate::utils::{AppError, AppResponse, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Stand-in account for the unknown-username path. Verifying against its
/// hash keeps that branch as expensive as a real password check, so
/// response timing does not separate "no such user" from "wrong password".
fn dummy_gebruiker() -> Gebruiker {
    static HASH: OnceLock<String> = OnceLock::new();
    let hash = HASH.get_or_init(|| {
        Gebruiker::hash_password("plaatsvervangend-wachtwoord").unwrap_or_default()
    });
    Gebruiker {
        id: 0,
        gebruikersnaam: String::new(),
        wachtwoord_hash: hash.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct LoginFormView {
    pub titel: &'static str,
}

/// GET /beheren: the login surface
pub async fn beheren_form() -> Json<AppResponse<LoginFormView>> {
    Json(AppResponse::success(LoginFormView { titel: "Inloggen" }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub gebruikersnaam: String,
    pub wachtwoord: String,
}

/// POST /beheren: authenticate and establish the admin session
pub async fn login(
    State(state): State<ServerState>,
    Form(form): Form<LoginForm>,
) -> AppResult<(AppendHeaders<[(http::HeaderName, String); 1]>, Redirect)> {
    let gevonden = gebruiker::find_by_gebruikersnaam(state.pool(), &form.gebruikersnaam).await?;

    // Fixed delay before the result is inspected
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let gebruiker = match gevonden {
        Some(g) => {
            let wachtwoord_ok = g
                .verify_password(&form.wachtwoord)
                .map_err(|e| AppError::internal(format!("Wachtwoordverificatie mislukt: {e}")))?;
            if !wachtwoord_ok {
                tracing::warn!(gebruikersnaam = %form.gebruikersnaam, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            g
        }
        None => {
            // Burn an equivalent verification before rejecting
            let _ = dummy_gebruiker().verify_password(&form.wachtwoord);
            tracing::warn!(gebruikersnaam = %form.gebruikersnaam, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .sessions
        .issue(gebruiker.id, &gebruiker.gebruikersnaam)
        .map_err(|e| AppError::internal(format!("Sessie aanmaken mislukt: {e}")))?;

    tracing::info!(
        gebruiker_id = gebruiker.id,
        gebruikersnaam = %gebruiker.gebruikersnaam,
        "Admin logged in"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, SessionService::session_cookie(&token))]),
        Redirect::to("/profiel"),
    ))
}

/// GET /uitloggen: clear the session cookie
pub async fn uitloggen(
    Extension(beheerder): Extension<CurrentAdmin>,
) -> (AppendHeaders<[(http::HeaderName, String); 1]>, Redirect) {
    tracing::info!(
        gebruiker_id = beheerder.id,
        gebruikersnaam = %beheerder.gebruikersnaam,
        "Admin logged out"
    );
    (
        AppendHeaders([(SET_COOKIE, SessionService::clear_cookie())]),
        Redirect::to("/"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_account_runs_a_real_verification() {
        let dummy = dummy_gebruiker();
        // A parseable hash that rejects whatever was submitted
        assert!(!dummy.verify_password("willekeurige-invoer").unwrap());
        assert!(dummy.verify_password("plaatsvervangend-wachtwoord").unwrap());
    }
}
