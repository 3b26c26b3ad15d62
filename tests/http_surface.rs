//! Routing and redirect contracts, driven through the full middleware
//! stack with `oneshot` requests.

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use tempfile::TempDir;
use tower::ServiceExt;

use sieraad_server::api;
use sieraad_server::auth::SessionService;
use sieraad_server::core::{Config, ServerState};
use sieraad_server::db::DbService;
use sieraad_server::db::repository::gebruiker;

const SECRET: &str = "test-geheim-van-zestien-plus";
const BOUNDARY: &str = "grens-7f3a9c";

struct TestApp {
    _dir: TempDir,
    state: ServerState,
    app: axum::Router,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("winkel.db");
    let db = DbService::new(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();
    gebruiker::ensure_seed_account(&db.pool, "beheerder", Some("geheim-wachtwoord"))
        .await
        .unwrap();

    let config = Config::with_overrides(
        format!("sqlite:{}", db_path.display()),
        SECRET,
        dir.path().join("uploads").display().to_string(),
    );
    let state = ServerState {
        config,
        db,
        sessions: Arc::new(SessionService::new(SECRET)),
    };
    let app = api::build_app(&state).with_state(state.clone());
    TestApp {
        _dir: dir,
        state,
        app,
    }
}

fn session_cookie(state: &ServerState) -> String {
    let token = state.sessions.issue(1, "beheerder").unwrap();
    format!("sessie={token}")
}

fn png_bytes() -> Vec<u8> {
    let buf = ImageBuffer::from_pixel(64, 64, Rgb::<u8>([180, 20, 60]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buf)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn veld(out: &mut Vec<u8>, naam: &str, waarde: &[u8], bestand: Option<&str>) {
    out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match bestand {
        Some(b) => out.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{naam}\"; filename=\"{b}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => out.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{naam}\"\r\n\r\n").as_bytes(),
        ),
    }
    out.extend_from_slice(waarde);
    out.extend_from_slice(b"\r\n");
}

/// Multipart body for a valid create: one complete color variant,
/// category 2 (Ringen).
fn create_body() -> Vec<u8> {
    let mut out = Vec::new();
    veld(&mut out, "naam", b"Ring Luna", None);
    veld(&mut out, "beschrijving", b"Handgemaakt", None);
    veld(&mut out, "prijs", b"24.95", None);
    veld(&mut out, "categorie_id", b"2", None);
    veld(&mut out, "kleur_naam", b"Goud", None);
    veld(&mut out, "foto", &png_bytes(), Some("foto.png"));
    veld(&mut out, "hover_foto", &png_bytes(), Some("hover.png"));
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

#[tokio::test]
async fn unauthenticated_mutations_redirect_to_login() {
    let t = test_app().await;

    for (method, uri) in [
        ("POST", "/producten/toevoegen"),
        ("GET", "/producten/bewerken/1"),
        ("POST", "/producten/verwijderen/1"),
        ("GET", "/profiel"),
        ("GET", "/uitloggen"),
    ] {
        let res = t
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{method} {uri}");
        assert_eq!(res.headers()["location"], "/beheren", "{method} {uri}");
    }
}

#[tokio::test]
async fn public_pages_need_no_session() {
    let t = test_app().await;

    for uri in ["/", "/contact", "/producten/ringen", "/beheren"] {
        let res = t
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn create_redirects_to_the_category_listing() {
    let t = test_app().await;

    let res = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/producten/toevoegen")
                .header("cookie", session_cookie(&t.state))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(create_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Category 2 is Ringen; its listing is the landing page after a create
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/producten/ringen");

    let aantal: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM producten")
        .fetch_one(t.state.pool())
        .await
        .unwrap();
    assert_eq!(aantal, 1);
}

#[tokio::test]
async fn delete_redirects_home() {
    let t = test_app().await;

    t.app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/producten/toevoegen")
                .header("cookie", session_cookie(&t.state))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(create_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    let res = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/producten/verwijderen/1")
                .header("cookie", session_cookie(&t.state))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let t = test_app().await;

    let mut antwoorden = Vec::new();
    for body in [
        "gebruikersnaam=onbekend&wachtwoord=wat-dan-ook",
        "gebruikersnaam=beheerder&wachtwoord=verkeerd",
    ] {
        let res = t
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/beheren")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        antwoorden.push(bytes);
    }
    assert_eq!(antwoorden[0], antwoorden[1]);
}

#[tokio::test]
async fn successful_login_sets_the_session_cookie() {
    let t = test_app().await;

    let res = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/beheren")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(
                    "gebruikersnaam=beheerder&wachtwoord=geheim-wachtwoord",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/profiel");
    let cookie = res.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("sessie="));
    assert!(cookie.contains("HttpOnly"));
}
