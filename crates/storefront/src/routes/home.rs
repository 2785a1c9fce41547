//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flash, OptionalAuth, flash};
use crate::models::CurrentUser;
use crate::routes::books::BookView;
use crate::state::AppState;

/// Number of featured books on the front page.
const FRONT_PAGE_BOOKS: i64 = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub books: Vec<BookView>,
}

/// Display the home page with the featured slice of the catalog.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<Response, AppError> {
    // Other pages degrade to a redirect here; home itself renders with
    // an empty shelf so a store outage cannot redirect-loop.
    let (books, notice) = match state.books().front_page(FRONT_PAGE_BOOKS).await {
        Ok(books) => (books, flash::take(&session).await?),
        Err(e) => {
            tracing::error!(error = %e, "store error");
            (Vec::new(), Some(Flash::danger("Database error occurred")))
        }
    };

    Ok(HomeTemplate {
        current_user,
        flash: notice,
        books: books.iter().map(BookView::from).collect(),
    }
    .into_response())
}
