//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use bazar_core::catalog::find_product;
use bazar_core::{Price, Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::{NavView, shop_href};
use crate::state::AppState;

/// Body served for unknown product IDs.
pub const PRODUCT_NOT_FOUND_HTML: &str = "<h2>Producto no encontrado</h2>";

/// Product card data for listings.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: Option<String>,
    pub category: String,
    pub branch: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            branch: product.branch.clone(),
        }
    }
}

/// Product detail data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: Option<String>,
    pub category: String,
    pub category_href: String,
    pub branch: String,
    pub branch_href: String,
    pub description: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            category_href: shop_href(&product.category, None),
            branch: product.branch.clone(),
            branch_href: shop_href(&product.category, Some(&product.branch)),
            description: product.description.clone().unwrap_or_default(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/product.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product: ProductDetailView,
}

/// Display a product detail page.
///
/// Path segments other than plain ASCII digits match no product and get the
/// same 404 body as unknown IDs.
///
/// # Errors
///
/// Returns [`AppError::ProductNotFound`] for unknown IDs, or an error if the
/// catalog cannot be loaded.
#[instrument(skip(state, user), fields(product_id = %raw_id))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_product_id(&raw_id)
        .ok_or_else(|| AppError::ProductNotFound(raw_id.clone()))?;

    let products = state.catalog().products().await?;
    let Some(product) = find_product(&products, id) else {
        tracing::debug!("Product not in catalog");
        return Err(AppError::ProductNotFound(raw_id));
    };

    let nav = NavView::load(&state, user).await?;
    Ok(ProductShowTemplate {
        nav,
        product: ProductDetailView::from(product),
    })
}

/// Parse a product path segment: one or more ASCII digits, no sign.
fn parse_product_id(raw: &str) -> Option<ProductId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i32>().ok().map(ProductId::new)
}
