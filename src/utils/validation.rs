//! Input validation helpers
//!
//! Centralized text length limits and the price parsing policy.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use rust_decimal::Decimal;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Item, variant and category names.
pub const MAX_NAAM_LEN: usize = 200;

/// Item descriptions.
pub const MAX_BESCHRIJVING_LEN: usize = 2000;

/// Usernames.
pub const MAX_GEBRUIKERSNAAM_LEN: usize = 100;

/// Passwords (before hashing).
pub const MAX_WACHTWOORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} mag niet leeg zijn")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is te lang ({} tekens, maximaal {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Parse a submitted price.
///
/// Missing or non-numeric input is always a validation error. Whether a
/// zero or negative price is accepted is a configuration policy
/// (`ALLOW_NON_POSITIVE_PRICES`); the original behaviour accepts it.
pub fn parse_prijs(raw: &str, allow_non_positive: bool) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Prijs is verplicht"));
    }
    let prijs: Decimal = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("Ongeldige prijs: {trimmed}")))?;
    if !allow_non_positive && prijs <= Decimal::ZERO {
        return Err(AppError::validation(
            "Prijs moet groter dan nul zijn".to_string(),
        ));
    }
    Ok(prijs)
}
