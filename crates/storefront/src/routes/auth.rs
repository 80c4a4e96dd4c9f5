//! Login gate route handlers.
//!
//! A successful login only sets the session's user flag; failures re-render
//! the form without a message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::NavView;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub usuario: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
}

/// Display the login page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(LoginTemplate { nav })
}

/// Handle login form submission.
///
/// # Errors
///
/// Returns 400 if a form field is missing, or an error if the session cannot
/// be updated.
#[instrument(skip(state, session, user, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match state
        .credentials()
        .verify(&form.usuario, &form.password)
    {
        Ok(username) => {
            session.cycle_id().await?;
            set_current_user(&session, &CurrentUser { username }).await?;
            tracing::info!(username = %form.usuario, "Login succeeded");
            add_breadcrumb("auth", "Login succeeded");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::info!(username = %form.usuario, reason = %e, "Login rejected");
            let nav = NavView::load(&state, user).await?;
            Ok(LoginTemplate { nav }.into_response())
        }
    }
}

/// Handle logout.
///
/// Only the user flag is dropped; the cart stays in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be updated.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    add_breadcrumb("auth", "Logged out");
    Ok(Redirect::to("/"))
}
