//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in account in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::flash::{self, Flash};
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in account.
///
/// If the visitor is not logged in, stores a warning notice and
/// redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the visitor is not logged in.
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// Session layer missing entirely.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: Option<CurrentUser> = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();

        match user {
            Some(user) => Ok(Self(user)),
            None => {
                let notice = login_notice(parts.uri.path());
                // A session write failure here only loses the notice,
                // not the redirect.
                let _ = flash::set(session, Flash::warning(notice)).await;
                Err(AuthRejection::RedirectToLogin)
            }
        }
    }
}

/// Pick the login prompt matching the page the visitor tried to reach.
fn login_notice(path: &str) -> &'static str {
    if path.starts_with("/add-to-cart") {
        "Please login to add items to cart"
    } else if path.starts_with("/remove-from-cart") {
        "Please login to modify your cart"
    } else if path.starts_with("/checkout") {
        "Please login to checkout"
    } else if path.starts_with("/orders") {
        "Please login to view orders"
    } else if path.starts_with("/cart") {
        "Please login to view your cart"
    } else {
        "Please login to continue"
    }
}

/// Extractor that optionally gets the current account.
///
/// Unlike `RequireAuth`, this does not reject the request if the visitor is not logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current account in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_notice_per_page() {
        assert_eq!(login_notice("/cart"), "Please login to view your cart");
        assert_eq!(
            login_notice("/add-to-cart/3"),
            "Please login to add items to cart"
        );
        assert_eq!(
            login_notice("/remove-from-cart/3"),
            "Please login to modify your cart"
        );
        assert_eq!(login_notice("/checkout"), "Please login to checkout");
        assert_eq!(login_notice("/orders"), "Please login to view orders");
        assert_eq!(login_notice("/elsewhere"), "Please login to continue");
    }
}
