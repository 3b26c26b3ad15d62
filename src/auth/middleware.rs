//! Session middleware
//!
//! Gates every mutation endpoint behind the single admin session.
//!
//! The session token is read from the `sessie` cookie. A valid token puts
//! [`CurrentAdmin`] in the request extensions; a missing or invalid one on
//! a protected path redirects to the login surface (`/beheren`), JSON and
//! page routes alike.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{CurrentAdmin, SessionService};
use crate::core::ServerState;
use crate::utils::LOGIN_PATH;

/// Paths that require an authenticated admin session.
fn is_protected_path(path: &str) -> bool {
    path == "/uitloggen"
        || path == "/profiel"
        || path.starts_with("/profiel/")
        || path == "/producten/toevoegen"
        || path.starts_with("/producten/bewerken/")
        || path.starts_with("/producten/verwijderen/")
}

/// Session gate middleware.
///
/// Runs for every request: public paths pass through untouched, protected
/// paths require a valid session cookie or get redirected to the login
/// form.
pub async fn session_gate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(SessionService::extract_from_cookies);

    // A valid session is attached even on public paths, so views can
    // render admin affordances
    if let Some(token) = token {
        match state.sessions.validate(token) {
            Ok(claims) => {
                req.extensions_mut().insert(CurrentAdmin::from(claims));
            }
            Err(e) => {
                tracing::warn!(error = %e, uri = %req.uri(), "Session validation failed");
            }
        }
    }

    if is_protected_path(req.uri().path()) && req.extensions().get::<CurrentAdmin>().is_none() {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_paths_are_protected() {
        assert!(is_protected_path("/producten/toevoegen"));
        assert!(is_protected_path("/producten/bewerken/7"));
        assert!(is_protected_path("/producten/verwijderen/7"));
        assert!(is_protected_path("/profiel"));
        assert!(is_protected_path("/profiel/wachtwoord/bewerken"));
        assert!(is_protected_path("/uitloggen"));
    }

    #[test]
    fn public_paths_pass() {
        assert!(!is_protected_path("/"));
        assert!(!is_protected_path("/contact"));
        assert!(!is_protected_path("/beheren"));
        assert!(!is_protected_path("/producten/ringen"));
        assert!(!is_protected_path("/producten/ringen/3"));
        assert!(!is_protected_path("/uploads/abcd.jpg"));
    }
}
