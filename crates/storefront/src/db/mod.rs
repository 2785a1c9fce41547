//! Database operations for the storefront `PostgreSQL` instance.
//!
//! # Tables
//!
//! - `users` - Registered accounts (unique username and email)
//! - `books` - The catalog, seeded at first startup
//! - `cart` - One row per (user, book) pair with a quantity
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! The schema is created idempotently at startup by [`schema::init_schema`];
//! there is no separate migration step.

pub mod books;
pub mod cart;
pub mod schema;
pub mod users;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use books::BookRepository;
pub use cart::CartRepository;
pub use users::UserRepository;

/// Base pool size plus allowed overflow.
const POOL_MAX_CONNECTIONS: u32 = 5 + 2;

/// How long a caller waits for a connection before failing.
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connections older than this are closed and re-opened (recycle).
const POOL_MAX_LIFETIME: Duration = Duration::from_secs(3600);

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate username or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool.
///
/// The pool is bounded, waits at most [`POOL_ACQUIRE_TIMEOUT`] for a free
/// connection, recycles connections after [`POOL_MAX_LIFETIME`], and
/// pings each connection before handing it out.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .min_connections(1)
        .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
        .max_lifetime(POOL_MAX_LIFETIME)
        .test_before_acquire(true)
        .connect(database_url.expose_secret())
        .await
}
