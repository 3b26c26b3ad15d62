//! Admin profile module: gated by the session middleware

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/profiel", get(handler::profiel))
        .route(
            "/profiel/gebruikersnaam/bewerken",
            post(handler::wijzig_gebruikersnaam),
        )
        .route(
            "/profiel/wachtwoord/bewerken",
            post(handler::wijzig_wachtwoord),
        )
}
