//! Session-related types.
//!
//! Types stored in the session for the login flag and the cart.

use serde::{Deserialize, Serialize};

/// Session-stored identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username accepted by the login gate.
    pub username: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "user";

    /// Key for storing the cart (product key → quantity).
    pub const CART: &str = "cart";
}
