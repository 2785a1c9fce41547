//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The cookie
//! carrying the session ID is signed with the configured secret.

use secrecy::ExposeSecret;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "leafbound_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over a `PostgreSQL` store.
///
/// The store's `sessions` table must already exist; `main` runs
/// `PostgresStore::migrate` before building the router.
///
/// # Errors
///
/// Returns an error if the session secret cannot be used as a signing
/// key. The config layer guarantees the length requirement, so this
/// only fires when the layer is wired up with an unvalidated secret.
pub fn create_session_layer(
    store: PostgresStore,
    config: &StorefrontConfig,
) -> Result<
    SessionManagerLayer<PostgresStore, tower_sessions::service::SignedCookie>,
    tower_sessions::cookie::KeyError,
> {
    let key = tower_sessions::cookie::Key::try_from(
        config.session_secret.expose_secret().as_bytes(),
    )?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.cookies_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
