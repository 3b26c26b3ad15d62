//! Session token service
//!
//! Signed session tokens (JWT, HS256) carried in an HttpOnly cookie.
//! This is the only access-control mechanism: there is one admin and
//! no roles or permissions beyond "is the admin logged in".

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessie";

/// Session lifetime in minutes (24 hours).
const SESSION_MINUTES: i64 = 1440;

/// Claims stored in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account id (subject)
    pub sub: i64,
    /// Username at login time
    pub gebruikersnaam: String,
    /// Expiry timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Ongeldige sessie: {0}")]
    InvalidToken(String),

    #[error("Sessie verlopen")]
    ExpiredToken,

    #[error("Ongeldige handtekening")]
    InvalidSignature,

    #[error("Sessie aanmaken mislukt: {0}")]
    GenerationFailed(String),
}

/// Session token service
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token for the authenticated admin.
    pub fn issue(&self, id: i64, gebruikersnaam: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: id,
            gebruikersnaam: gebruikersnaam.to_string(),
            exp: (now + Duration::minutes(SESSION_MINUTES)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a session token.
    pub fn validate(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                _ => SessionError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// `Set-Cookie` value establishing a session.
    pub fn session_cookie(token: &str) -> String {
        format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/")
    }

    /// `Set-Cookie` value clearing the session.
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
    }

    /// Extract the session token from a `Cookie` header value.
    pub fn extract_from_cookies(cookie_header: &str) -> Option<&str> {
        cookie_header.split(';').find_map(|pair| {
            let pair = pair.trim();
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }
}

/// Request-scoped context for the authenticated admin.
///
/// Created by the session middleware and injected as a request extension;
/// handlers that mutate state take it via `Extension<CurrentAdmin>`.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: i64,
    pub gebruikersnaam: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            gebruikersnaam: claims.gebruikersnaam,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_validate_roundtrip() {
        let svc = SessionService::new("een-geheim-van-minstens-16-bytes");
        let token = svc.issue(1, "beheerder").unwrap();
        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.gebruikersnaam, "beheerder");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let svc = SessionService::new("een-geheim-van-minstens-16-bytes");
        let other = SessionService::new("een-heel-ander-geheim-dan-eerst");
        let token = svc.issue(1, "beheerder").unwrap();
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn cookie_extraction_handles_multiple_pairs() {
        let header = "taal=nl; sessie=abc.def.ghi; thema=donker";
        assert_eq!(
            SessionService::extract_from_cookies(header),
            Some("abc.def.ghi")
        );
        assert_eq!(SessionService::extract_from_cookies("taal=nl"), None);
    }
}
