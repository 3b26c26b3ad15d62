//! Product administration module: create, edit, delete
//!
//! All routes here are gated by the session middleware.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/producten/toevoegen",
            get(handler::toevoegen_form).post(handler::toevoegen),
        )
        .route(
            "/producten/bewerken/{id}",
            get(handler::bewerken_form).post(handler::bewerken),
        )
        .route("/producten/verwijderen/{id}", post(handler::verwijderen))
}
