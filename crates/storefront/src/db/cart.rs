//! Cart repository.
//!
//! A cart is a set of (user, book, quantity) rows keyed by the
//! composite primary key. Adding the same book twice accumulates into
//! one row; the upsert below does that in a single statement so two
//! concurrent adds cannot lose an update.

use leafbound_core::{BookId, UserId};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::CartItem;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines for an account, joined with their books.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT b.id AS book_id, b.title, b.price, c.quantity
             FROM cart c
             JOIN books b ON b.id = c.book_id
             WHERE c.user_id = $1
             ORDER BY b.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add `quantity` copies of a book to an account's cart.
    ///
    /// Inserts a new line or increments the existing one atomically;
    /// the conflict clause keys on the composite primary key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails
    /// (including a foreign-key violation for an unknown book).
    pub async fn add(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let quantity = i32::try_from(quantity).unwrap_or(i32::MAX);

        sqlx::query(
            "INSERT INTO cart (user_id, book_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, book_id)
             DO UPDATE SET quantity = cart.quantity + EXCLUDED.quantity",
        )
        .bind(user_id)
        .bind(book_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove one book's line from an account's cart.
    ///
    /// Removing a line that does not exist is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove(&self, user_id: UserId, book_id: BookId) -> Result<(), RepositoryError> {
        sqlx::query(
            "DELETE FROM cart
             WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete every line in an account's cart (checkout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            "DELETE FROM cart
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
