//! Login/logout module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/beheren", get(handler::beheren_form).post(handler::login))
        .route("/uitloggen", get(handler::uitloggen))
}
