//! Catalog route handlers.
//!
//! Book listing and detail pages. The catalog is public; no login is
//! required to browse it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use leafbound_core::BookId;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flash, OptionalAuth, flash};
use crate::models::{Book, CurrentUser};
use crate::routes::{flash_redirect, store_error};
use crate::state::AppState;

/// A book prepared for rendering.
///
/// Prices are preformatted so templates never do arithmetic.
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price.to_string(),
            description: book.description.clone(),
            image_url: book.image_url.clone(),
        }
    }
}

/// Book listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/index.html")]
pub struct BooksTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub books: Vec<BookView>,
}

/// Book detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/show.html")]
pub struct BookDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub book: BookView,
}

/// Display the full catalog.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<Response, AppError> {
    let books = match state.books().all().await {
        Ok(books) => books,
        Err(e) => return store_error(&session, e).await,
    };

    Ok(BooksTemplate {
        current_user,
        flash: flash::take(&session).await?,
        books: books.iter().map(BookView::from).collect(),
    }
    .into_response())
}

/// Display a single book.
///
/// An unknown ID sends the visitor back to the catalog with a notice
/// rather than a bare 404 page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Path(id): Path<BookId>,
) -> Result<Response, AppError> {
    let book = match state.books().get(id).await {
        Ok(Some(book)) => book,
        Ok(None) => {
            return flash_redirect(&session, Flash::danger("Book not found"), "/books").await;
        }
        Err(e) => return store_error(&session, e).await,
    };

    Ok(BookDetailTemplate {
        current_user,
        flash: flash::take(&session).await?,
        book: BookView::from(&book),
    }
    .into_response())
}
