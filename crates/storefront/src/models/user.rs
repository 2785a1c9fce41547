//! Account domain type.

use leafbound_core::{Email, UserId, Username};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; it only
/// travels through the login path and never leaves the auth service.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique account ID.
    pub id: UserId,
    /// Login name, unique across accounts.
    pub username: Username,
    /// Email address, unique across accounts.
    pub email: Email,
}
