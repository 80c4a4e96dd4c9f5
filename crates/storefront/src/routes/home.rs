//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::NavView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub products: Vec<ProductCardView>,
}

/// Display the home page with the full catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    let products = state.catalog().products().await?;

    Ok(HomeTemplate {
        nav,
        products: products.iter().map(ProductCardView::from).collect(),
    })
}
