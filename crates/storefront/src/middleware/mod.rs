//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request and its span)
//! 4. Session layer (tower-sessions, signed cookie, expiring moka-backed store)
//!
//! Handlers then use the extractors defined here: `OptionalUser` for the
//! login flag and `CartSession` for the cart.

pub mod auth;
pub mod cart;
pub mod request_id;
pub mod session;

pub use auth::{OptionalUser, clear_current_user, set_current_user};
pub use cart::CartSession;
pub use request_id::request_id_middleware;
pub use session::{CacheSessionStore, with_sessions};
