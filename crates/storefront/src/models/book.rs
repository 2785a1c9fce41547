//! Catalog item domain type.

use leafbound_core::{BookId, Price};

/// A purchasable book in the catalog.
///
/// Books are created only by the seed step and never mutated by end
/// users, so this maps straight onto its table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Book {
    /// Unique book ID.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Unit price.
    pub price: Price,
    /// Optional blurb shown on the detail page.
    pub description: Option<String>,
    /// Optional cover image URL.
    pub image_url: Option<String>,
}
