//! Utility module: shared types and helpers
//!
//! - [`AppError`] / [`AppResult`]: application error type
//! - [`AppResponse`]: unified JSON response envelope
//! - validation, logging and time helpers

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult, INVALID_CREDENTIALS_MSG, LOGIN_PATH};
pub use time::now_millis;
