//! Catalog search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flash, OptionalAuth, flash};
use crate::models::CurrentUser;
use crate::routes::books::BookView;
use crate::routes::store_error;
use crate::state::AppState;

/// Search query parameters.
///
/// A missing `q` behaves like an empty query and matches everything.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub query: String,
    pub books: Vec<BookView>,
}

/// Display search results over title and author.
#[instrument(skip(state, session))]
pub async fn search(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Query(params): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let books = match state.books().search(&params.q).await {
        Ok(books) => books,
        Err(e) => return store_error(&session, e).await,
    };

    Ok(SearchTemplate {
        current_user,
        flash: flash::take(&session).await?,
        query: params.q,
        books: books.iter().map(BookView::from).collect(),
    }
    .into_response())
}
