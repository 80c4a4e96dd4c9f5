//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (full catalog)
//! GET  /health                 - Health check
//!
//! # Shop
//! GET  /shop?q=&cat=&sub=      - Filtered listing
//! GET  /product/{id}           - Product detail
//!
//! # Pages
//! GET  /cart                   - Cart page (populated by the cart API)
//! GET  /checkout               - Checkout page
//! GET  /about                  - About page
//! GET  /contact                - Contact page
//! GET  /become-seller          - Seller signup page
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Logout action
//!
//! # Cart API (JSON)
//! GET  /api/cart               - Current cart aggregate
//! POST /api/cart/add           - Add units of a product
//! POST /api/cart/remove        - Drop a product line
//! POST /api/cart/clear         - Empty the cart
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod pages;
pub mod products;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};
use bazar_core::Category;

use crate::error::Result;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(shop::shop))
        .route("/product/{id}", get(products::show))
        .route("/cart", get(cart::show))
        .route("/checkout", get(pages::checkout))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/become-seller", get(pages::become_seller))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create the cart API routes router.
pub fn cart_api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(cart::api_show))
        .route("/api/cart/add", post(cart::api_add))
        .route("/api/cart/remove", post(cart::api_remove))
        .route("/api/cart/clear", post(cart::api_clear))
}

// =============================================================================
// Shared Layout Data
// =============================================================================

/// A navigation link.
#[derive(Clone)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

/// A top-level navigation entry with its branch links.
#[derive(Clone)]
pub struct NavCategory {
    pub name: String,
    pub href: String,
    pub branches: Vec<NavLink>,
}

impl From<&Category> for NavCategory {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            href: shop_href(&category.name, None),
            branches: category
                .branches
                .iter()
                .map(|branch| NavLink {
                    name: branch.clone(),
                    href: shop_href(&category.name, Some(branch)),
                })
                .collect(),
        }
    }
}

/// Data every page layout renders: category navigation and the login state.
#[derive(Clone)]
pub struct NavView {
    pub categories: Vec<NavCategory>,
    pub username: Option<String>,
}

impl NavView {
    /// Load navigation for a request.
    ///
    /// Categories are read from the catalog on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the category file cannot be loaded.
    pub async fn load(state: &AppState, user: Option<CurrentUser>) -> Result<Self> {
        let categories = state.catalog().categories().await?;
        Ok(Self {
            categories: categories.iter().map(NavCategory::from).collect(),
            username: user.map(|u| u.username),
        })
    }
}

/// Link to the shop filtered by category and optionally branch.
#[must_use]
pub fn shop_href(category: &str, branch: Option<&str>) -> String {
    let mut href = format!("/shop?cat={}", urlencoding::encode(category));
    if let Some(branch) = branch {
        href.push_str("&sub=");
        href.push_str(&urlencoding::encode(branch));
    }
    href
}
