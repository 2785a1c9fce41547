//! Cart line domain type.

use leafbound_core::{BookId, Price};

/// One line of a user's cart, joined with its book.
///
/// The invariant `quantity >= 1` is enforced by the store; a line is
/// deleted outright rather than decremented to zero.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItem {
    /// The book this line refers to.
    pub book_id: BookId,
    /// Book title (from the join).
    pub title: String,
    /// Unit price (from the join).
    pub price: Price,
    /// Number of copies in the cart.
    pub quantity: i32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(u32::try_from(self.quantity).unwrap_or(0))
    }
}
