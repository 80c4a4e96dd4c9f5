//! Shop listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use bazar_core::search::search;
use bazar_core::{Resolution, ShopQuery};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::NavView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Query parameters for the shop listing.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    /// Free-text query.
    #[serde(default)]
    pub q: String,
    /// Exact category filter.
    pub cat: Option<String>,
    /// Exact branch filter.
    pub sub: Option<String>,
}

impl ShopParams {
    fn to_query(&self) -> ShopQuery {
        ShopQuery::new(&self.q, self.cat.as_deref(), self.sub.as_deref())
    }
}

/// Shop listing template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/shop.html")]
pub struct ShopTemplate {
    pub nav: NavView,
    pub products: Vec<ProductCardView>,
    pub heading: String,
    pub query: String,
    pub selected_cat: String,
    pub selected_sub: String,
}

/// Display the shop listing filtered by `q`, `cat` and `sub`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[instrument(skip(state, user))]
pub async fn shop(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(params): Query<ShopParams>,
) -> Result<impl IntoResponse> {
    let query = params.to_query();
    let products = state.catalog().products().await?;
    let total = products.len();

    let outcome = search(products, &query);
    tracing::debug!(
        resolution = %outcome.resolution,
        matched = outcome.products.len(),
        total,
        "Shop query resolved"
    );

    let nav = NavView::load(&state, user).await?;
    Ok(ShopTemplate {
        nav,
        heading: heading(&query, &outcome.resolution),
        products: outcome.products.iter().map(ProductCardView::from).collect(),
        query: query.q,
        selected_cat: query.category.unwrap_or_default(),
        selected_sub: query.branch.unwrap_or_default(),
    })
}

/// Listing title: the explicit filter if any, else what the query resolved to.
fn heading(query: &ShopQuery, resolution: &Resolution) -> String {
    if let Some(branch) = &query.branch {
        return branch.clone();
    }
    if let Some(category) = &query.category {
        return category.clone();
    }
    match resolution {
        Resolution::All => "Todos los productos".to_string(),
        Resolution::Category(name) | Resolution::Branch(name) => capitalize(name),
        Resolution::Text(text) => format!("Resultados para \u{201c}{text}\u{201d}"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
