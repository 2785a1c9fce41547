//! User repository for account operations.
//!
//! Accounts are created by registration and read by login; nothing in
//! this system updates or deletes them.

use leafbound_core::{Email, UserId, Username};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::User;

/// Raw account row before validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: String,
}

impl UserRow {
    /// Convert a stored row into the domain type, failing on data
    /// that should never have been persisted.
    fn into_user(self) -> Result<User, RepositoryError> {
        let username = Username::parse(&self.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: self.id,
            username,
            email,
        })
    }
}

/// Repository for account database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is
    /// already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password_hash, email)
             VALUES ($1, $2, $3)
             RETURNING id, username, email",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user()
    }

    /// Get an account and its password hash by username.
    ///
    /// Returns `None` if no such account exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CredentialRow {
            id: UserId,
            username: String,
            email: String,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, email, password_hash
             FROM users
             WHERE username = $1",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let password_hash = r.password_hash;
        let user = UserRow {
            id: r.id,
            username: r.username,
            email: r.email,
        }
        .into_user()?;

        Ok(Some((user, password_hash)))
    }
}
