//! Public pages module: home, contact and catalog views

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/contact", get(handler::contact))
        .route("/producten/{categorie}", get(handler::lijst))
        .route("/producten/{categorie}/{id}", get(handler::detail))
}
