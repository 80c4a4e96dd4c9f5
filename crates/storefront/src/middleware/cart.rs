//! Session-backed cart extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use bazar_core::Cart;
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use crate::error::AppError;
use crate::models::session_keys;

/// The cart stored in the caller's session.
///
/// Handlers load the cart, mutate it and save it back; the session store
/// gives last-write-wins semantics per request.
pub struct CartSession(Session);

impl CartSession {
    /// Load the cart, empty if the session has none.
    ///
    /// A stored value that no longer deserializes is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(&self) -> Result<Cart, SessionError> {
        match self.0.get::<Cart>(session_keys::CART).await {
            Ok(cart) => Ok(cart.unwrap_or_default()),
            Err(SessionError::SerdeJson(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable cart in session");
                Ok(Cart::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Store `cart` in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), SessionError> {
        self.0.insert(session_keys::CART, cart).await
    }

    /// Load the cart, apply `change`, and save it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn update<F>(&self, change: F) -> Result<Cart, SessionError>
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.load().await?;
        change(&mut cart);
        self.save(&cart).await?;
        Ok(cart)
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}
