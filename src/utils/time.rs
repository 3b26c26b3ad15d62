//! Time helpers: repositories only ever see `i64` Unix millis.

/// Current time as Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
