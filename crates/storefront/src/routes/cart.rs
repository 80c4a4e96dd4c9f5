//! Cart route handlers.
//!
//! The cart page is a shell; its contents are fetched and mutated by the
//! browser through the JSON cart API. The cart itself lives in the session
//! as a product-key → quantity map and every API call answers with the
//! freshly aggregated cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use bazar_core::CartSummary;
use bazar_core::cart::ProductRef;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::{ApiError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{CartSession, OptionalUser};
use crate::routes::NavView;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/cart/add`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: ProductRef,
    /// Units to add; absent, null, `0` or `""` mean one. Fractional numbers
    /// are truncated toward zero.
    #[serde(default, deserialize_with = "quantity_from_int_or_str")]
    pub qty: Option<i64>,
}

/// Body of `POST /api/cart/remove`.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: ProductRef,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityInput {
    Int(i64),
    Float(f64),
    Text(String),
}

fn quantity_from_int_or_str<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<QuantityInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(QuantityInput::Int(n)) => Ok(Some(n)),
        #[allow(clippy::cast_possible_truncation)]
        Some(QuantityInput::Float(n)) => Ok(Some(n.trunc() as i64)),
        Some(QuantityInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid qty: {s:?}")))
        }
    }
}

/// Parse a JSON request body whatever its `Content-Type`.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> std::result::Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid cart request: {e}")))
}

// =============================================================================
// Cart Page
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/cart.html")]
pub struct CartPageTemplate {
    pub nav: NavView,
}

/// Display the cart page.
///
/// # Errors
///
/// Returns an error if the navigation categories cannot be loaded.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let nav = NavView::load(&state, user).await?;
    Ok(CartPageTemplate { nav })
}

// =============================================================================
// Cart API
// =============================================================================

/// Aggregate the session cart against the current catalog.
async fn summarize(
    state: &AppState,
    cart: &bazar_core::Cart,
) -> std::result::Result<CartSummary, ApiError> {
    let products = state.catalog().products().await?;
    Ok(cart.summarize(&products))
}

/// Return the current cart.
///
/// # Errors
///
/// Returns an error if the session or catalog cannot be read.
#[instrument(skip(state, cart))]
pub async fn api_show(
    State(state): State<AppState>,
    cart: CartSession,
) -> std::result::Result<Json<CartSummary>, ApiError> {
    let cart = cart.load().await?;
    Ok(Json(summarize(&state, &cart).await?))
}

/// Add units of a product to the cart.
///
/// # Errors
///
/// Returns 400 if the body is not a valid add request, or an error if the
/// session or catalog cannot be accessed.
#[instrument(skip(state, cart, body))]
pub async fn api_add(
    State(state): State<AppState>,
    cart: CartSession,
    body: Bytes,
) -> std::result::Result<Json<CartSummary>, ApiError> {
    let request: AddToCartRequest = parse_body(&body)?;
    let key = request.id.cart_key();

    let updated = cart.update(|c| c.add(&key, request.qty)).await?;
    tracing::info!(product = %key, qty = ?request.qty, "Added to cart");
    add_breadcrumb("cart", &format!("Added product {key}"));

    Ok(Json(summarize(&state, &updated).await?))
}

/// Remove a product line from the cart.
///
/// # Errors
///
/// Returns 400 if the body has no product id, or an error if the session or
/// catalog cannot be accessed.
#[instrument(skip(state, cart, body))]
pub async fn api_remove(
    State(state): State<AppState>,
    cart: CartSession,
    body: Bytes,
) -> std::result::Result<Json<CartSummary>, ApiError> {
    let request: RemoveFromCartRequest = parse_body(&body)?;
    let key = request.id.cart_key();

    let updated = cart.update(|c| c.remove(&key)).await?;
    tracing::info!(product = %key, "Removed from cart");
    add_breadcrumb("cart", &format!("Removed product {key}"));

    Ok(Json(summarize(&state, &updated).await?))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the session or catalog cannot be accessed.
#[instrument(skip(state, cart))]
pub async fn api_clear(
    State(state): State<AppState>,
    cart: CartSession,
) -> std::result::Result<Json<CartSummary>, ApiError> {
    let updated = cart.update(bazar_core::Cart::clear).await?;
    tracing::info!("Cleared cart");

    Ok(Json(summarize(&state, &updated).await?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_accepts_int_or_string_ids() {
        let request: AddToCartRequest = parse_body(&Bytes::from(r#"{"id": 1, "qty": 2}"#)).unwrap();
        assert_eq!(request.id.cart_key(), "1");
        assert_eq!(request.qty, Some(2));

        let request: AddToCartRequest = parse_body(&Bytes::from(r#"{"id": "7"}"#)).unwrap();
        assert_eq!(request.id.cart_key(), "7");
        assert_eq!(request.qty, None);
    }

    #[test]
    fn test_add_request_quantity_forms() {
        let request: AddToCartRequest =
            parse_body(&Bytes::from(r#"{"id": 1, "qty": "3"}"#)).unwrap();
        assert_eq!(request.qty, Some(3));

        let request: AddToCartRequest =
            parse_body(&Bytes::from(r#"{"id": 1, "qty": null}"#)).unwrap();
        assert_eq!(request.qty, None);

        let request: AddToCartRequest = parse_body(&Bytes::from(r#"{"id": 1, "qty": ""}"#)).unwrap();
        assert_eq!(request.qty, None);

        let request: AddToCartRequest = parse_body(&Bytes::from(r#"{"id": 1, "qty": -1}"#)).unwrap();
        assert_eq!(request.qty, Some(-1));
    }

    #[test]
    fn test_fractional_quantity_truncates() {
        let request: AddToCartRequest =
            parse_body(&Bytes::from(r#"{"id": 1, "qty": 2.0}"#)).unwrap();
        assert_eq!(request.qty, Some(2));

        let request: AddToCartRequest =
            parse_body(&Bytes::from(r#"{"id": 1, "qty": 2.9}"#)).unwrap();
        assert_eq!(request.qty, Some(2));

        let request: AddToCartRequest =
            parse_body(&Bytes::from(r#"{"id": 1, "qty": -1.5}"#)).unwrap();
        assert_eq!(request.qty, Some(-1));

        let text = Bytes::from(r#"{"id": 1, "qty": "2.5"}"#);
        assert!(parse_body::<AddToCartRequest>(&text).is_err());
    }

    #[test]
    fn test_malformed_bodies_are_bad_requests() {
        for body in ["", "not json", r#"{"qty": 2}"#, r#"{"id": 1, "qty": "lots"}"#] {
            let err = parse_body::<AddToCartRequest>(&Bytes::from(body)).unwrap_err();
            assert_eq!(err.0.status(), axum::http::StatusCode::BAD_REQUEST, "{body}");
        }
    }
}
