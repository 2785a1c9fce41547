//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured books)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /books                  - Book listing
//! GET  /book/{id}              - Book detail
//! GET  /search                 - Search by title or author
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /add-to-cart/{id}       - Add a book to the cart
//! GET  /remove-from-cart/{id}  - Remove a book from the cart
//! GET  /checkout               - Place the order (clears the cart)
//! GET  /orders                 - Order confirmation page
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! GET  /logout                 - Logout action
//! ```

pub mod auth;
pub mod books;
pub mod cart;
pub mod home;
pub mod search;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{Flash, flash};
use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .route("/books", get(books::index))
        .route("/book/{id}", get(books::show))
        .route("/search", get(search::search))
        // Cart routes
        .route("/cart", get(cart::show))
        .route("/add-to-cart/{id}", post(cart::add))
        .route("/remove-from-cart/{id}", get(cart::remove))
        .route("/checkout", get(cart::checkout))
        .route("/orders", get(cart::orders))
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Store a notice and redirect.
///
/// The common tail of every mutating handler: the notice lands in the
/// session and the next rendered page takes it out.
pub(crate) async fn flash_redirect(
    session: &Session,
    notice: Flash,
    to: &str,
) -> Result<Response, AppError> {
    flash::set(session, notice).await?;
    Ok(Redirect::to(to).into_response())
}

/// Degrade a store failure to a generic notice plus redirect home.
///
/// The detail is logged server-side; the visitor never sees raw
/// database error text.
pub(crate) async fn store_error(
    session: &Session,
    err: impl std::fmt::Display,
) -> Result<Response, AppError> {
    tracing::error!(error = %err, "store error");
    flash_redirect(session, Flash::danger("Database error occurred"), "/").await
}
