//! Authentication route handlers.
//!
//! Handles account registration, login, and logout. Failed submissions
//! re-render the form with a notice instead of redirecting, so the
//! visitor keeps their place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flash, OptionalAuth, flash, set_current_user};
use crate::models::{CurrentUser, User};
use crate::routes::{flash_redirect, store_error};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<Response, AppError> {
    Ok(LoginTemplate {
        current_user,
        flash: flash::take(&session).await?,
    }
    .into_response())
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            set_current_user(&session, &current_user_from(&user)).await?;
            flash_redirect(&session, Flash::success("Login successful!"), "/").await
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed");
            Ok(LoginTemplate {
                current_user: None,
                flash: Some(Flash::danger("Invalid username or password")),
            }
            .into_response())
        }
        Err(e) => store_error(&session, e).await,
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip_all)]
pub async fn register_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<Response, AppError> {
    Ok(RegisterTemplate {
        current_user,
        flash: flash::take(&session).await?,
    }
    .into_response())
}

/// Handle registration form submission.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match AuthService::new(state.pool())
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(_) => {
            flash_redirect(
                &session,
                Flash::success("Registration successful! Please login."),
                "/login",
            )
            .await
        }
        Err(e) => {
            let notice = match &e {
                AuthError::UserAlreadyExists => "Username or email already exists".to_string(),
                AuthError::InvalidUsername(err) => err.to_string(),
                AuthError::InvalidEmail(err) => err.to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                _ => return store_error(&session, e).await,
            };
            tracing::warn!(error = %e, "Registration rejected");
            Ok(RegisterTemplate {
                current_user: None,
                flash: Some(Flash::danger(notice)),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// The whole session is discarded, not just the identity key, so
/// nothing set while logged in survives into the anonymous session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session.flush().await?;

    flash_redirect(&session, Flash::info("You have been logged out"), "/").await
}

/// Session identity for a freshly authenticated account.
fn current_user_from(user: &User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        username: user.username.clone(),
    }
}
