//! Book repository for catalog queries.
//!
//! The catalog is read-only at request time; only the seed step writes
//! to it. All queries use bound placeholders.

use leafbound_core::BookId;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Book;

/// Repository for catalog database operations.
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the first `limit` books by ascending ID.
    ///
    /// The front page shows the oldest entries in the catalog, so the
    /// ordering is pinned explicitly rather than left to the planner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn front_page(&self, limit: i64) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, price, description, image_url
             FROM books
             ORDER BY id ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Get the full catalog by ascending ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, price, description, image_url
             FROM books
             ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Get a single book by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, price, description, image_url
             FROM books
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }

    /// Case-insensitive substring search over title and author.
    ///
    /// The query string is wildcard-escaped and passed as a bound
    /// parameter; an empty query matches the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Book>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(query));

        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, price, description, image_url
             FROM books
             WHERE title ILIKE $1 OR author ILIKE $1
             ORDER BY id ASC",
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Number of books in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// Escape `LIKE` wildcards so a user query matches literally.
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
