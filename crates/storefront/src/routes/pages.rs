//! Static page route handlers.
//!
//! These pages carry no data beyond the shared navigation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::NavView;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/checkout.html")]
pub struct CheckoutTemplate {
    pub nav: NavView,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub nav: NavView,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub nav: NavView,
}

/// Seller signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/become-seller.html")]
pub struct BecomeSellerTemplate {
    pub nav: NavView,
}

/// Display the checkout page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn checkout(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(CheckoutTemplate { nav })
}

/// Display the about page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn about(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(AboutTemplate { nav })
}

/// Display the contact page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn contact(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(ContactTemplate { nav })
}

/// Display the seller signup page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn become_seller(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(BecomeSellerTemplate { nav })
}
