//! Admin account model

use serde::{Deserialize, Serialize};

/// The single admin account. The application never creates accounts
/// beyond the startup seed; this row is effectively read-mostly.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gebruiker {
    pub id: i64,
    pub gebruikersnaam: String,
    #[serde(skip_serializing)]
    pub wachtwoord_hash: String,
}

impl Gebruiker {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.wachtwoord_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = Gebruiker::hash_password("wachtwoord123").unwrap();
        let gebruiker = Gebruiker {
            id: 1,
            gebruikersnaam: "beheerder".into(),
            wachtwoord_hash: hash,
        };
        assert!(gebruiker.verify_password("wachtwoord123").unwrap());
        assert!(!gebruiker.verify_password("verkeerd").unwrap());
    }
}
