//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from
//! database row types.

pub mod book;
pub mod cart;
pub mod session;
pub mod user;

pub use book::Book;
pub use cart::CartItem;
pub use session::{CurrentUser, session_keys};
pub use user::User;
