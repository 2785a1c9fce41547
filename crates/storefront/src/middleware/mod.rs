//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, set_current_user};
pub use flash::Flash;
pub use session::create_session_layer;
