//! Cart route handlers.
//!
//! Every operation here requires a logged-in account; `RequireAuth`
//! redirects anonymous visitors to the login page with a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::header::REFERER,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use leafbound_core::{BookId, Price};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flash, RequireAuth, flash};
use crate::models::{CartItem, CurrentUser};
use crate::routes::{flash_redirect, store_error};
use crate::state::AppState;

/// Where add-to-cart lands when the request carries no usable referer.
const CATALOG_FALLBACK: &str = "/books";

/// A cart line prepared for rendering.
pub struct CartLineView {
    pub book_id: BookId,
    pub title: String,
    pub price: String,
    pub quantity: i32,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            book_id: item.book_id,
            title: item.title.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub items: Vec<CartLineView>,
    pub total: String,
}

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
}

/// Add-to-cart form data.
///
/// `quantity` stays a raw string so a malformed value reaches the
/// validation below instead of a 422 from the form extractor.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub quantity: Option<String>,
}

/// Interpret the submitted quantity.
///
/// An absent or empty field means one copy. A value that is present but
/// not a positive integer is rejected outright.
fn parse_quantity(raw: Option<&str>) -> Option<u32> {
    match raw {
        None => Some(1),
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(1);
            }
            match s.parse::<u32>() {
                Ok(n) if n >= 1 => Some(n),
                _ => None,
            }
        }
    }
}

/// Display the cart with line and grand totals.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let items = match state.carts().items(user.id).await {
        Ok(items) => items,
        Err(e) => return store_error(&session, e).await,
    };

    let total: Price = items.iter().map(CartItem::line_total).sum();

    Ok(CartTemplate {
        current_user: Some(user),
        flash: flash::take(&session).await?,
        items: items.iter().map(CartLineView::from).collect(),
        total: total.to_string(),
    }
    .into_response())
}

/// Handle add-to-cart form submission.
///
/// On success the visitor goes back to the page the form was on.
#[instrument(skip(state, session, headers, form), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    headers: HeaderMap,
    Path(book_id): Path<BookId>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let back = back_url(&headers, &state.config().base_url);

    let Some(quantity) = parse_quantity(form.quantity.as_deref()) else {
        return flash_redirect(&session, Flash::danger("Invalid quantity"), &back).await;
    };

    match state.books().get(book_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return flash_redirect(&session, Flash::danger("Book not found"), CATALOG_FALLBACK)
                .await;
        }
        Err(e) => return store_error(&session, e).await,
    }

    if let Err(e) = state.carts().add(user.id, book_id, quantity).await {
        return store_error(&session, e).await;
    }

    flash_redirect(&session, Flash::success("Item added to cart"), &back).await
}

/// Handle removing one book from the cart.
#[instrument(skip(state, session), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(book_id): Path<BookId>,
) -> Result<Response, AppError> {
    if let Err(e) = state.carts().remove(user.id, book_id).await {
        return store_error(&session, e).await;
    }

    flash_redirect(&session, Flash::success("Item removed from cart"), "/cart").await
}

/// Place an order: the whole cart empties and the visitor lands on the
/// orders page with a confirmation.
#[instrument(skip(state, session), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    if let Err(e) = state.carts().clear(user.id).await {
        return store_error(&session, e).await;
    }

    flash_redirect(&session, Flash::success("Order placed successfully!"), "/orders").await
}

/// Display the orders page.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn orders(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    Ok(OrdersTemplate {
        current_user: Some(user),
        flash: flash::take(&session).await?,
    }
    .into_response())
}

/// Same-site redirect target from the `Referer` header.
///
/// Browsers send the full URL, so a referer under our own base URL is
/// reduced to its path. Anything pointing off-site, including
/// protocol-relative `//host` forms, falls back to the catalog.
fn back_url(headers: &HeaderMap, base_url: &str) -> String {
    let Some(referer) = headers.get(REFERER).and_then(|v| v.to_str().ok()) else {
        return CATALOG_FALLBACK.to_string();
    };

    let path = referer.strip_prefix(base_url).unwrap_or(referer);

    if path.is_empty() {
        return "/".to_string();
    }

    if path.starts_with('/') && !path.starts_with("//") {
        return path.to_string();
    }

    CATALOG_FALLBACK.to_string()
}
