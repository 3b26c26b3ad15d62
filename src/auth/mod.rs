//! Authentication module
//!
//! - [`SessionService`]: signed session tokens
//! - [`CurrentAdmin`]: request-scoped admin context
//! - [`session_gate`]: middleware gating mutation endpoints

pub mod middleware;
pub mod session;

pub use middleware::session_gate;
pub use session::{Claims, CurrentAdmin, SessionError, SessionService};
