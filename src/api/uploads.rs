//! Serving normalized upload files
//!
//! Filenames are generated server-side (16 hex chars + ".jpg"), so anything
//! with a path separator in it is rejected outright.

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{StatusCode, header::CONTENT_TYPE};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{bestand}", get(serve_upload))
}

fn is_safe_filename(naam: &str) -> bool {
    !naam.is_empty() && !naam.contains("..") && !naam.contains('/') && !naam.contains('\\')
}

async fn serve_upload(State(state): State<ServerState>, Path(bestand): Path<String>) -> Response {
    if !is_safe_filename(&bestand) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let pad = state.upload_dir().join(&bestand);
    match tokio::fs::read(&pad).await {
        Ok(data) => {
            let mime = mime_guess::from_path(&bestand).first_or_octet_stream();
            ([(CONTENT_TYPE, mime.as_ref().to_string())], data).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_names_are_rejected() {
        assert!(!is_safe_filename("../geheim.txt"));
        assert!(!is_safe_filename("map/bestand.jpg"));
        assert!(!is_safe_filename("map\\bestand.jpg"));
        assert!(!is_safe_filename(""));
        assert!(is_safe_filename("a1b2c3d4e5f60718.jpg"));
    }
}
