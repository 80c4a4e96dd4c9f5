//! Domain models for storefront.
//!
//! Catalog and cart types live in `bazar-core`; this module holds what
//! only the web layer stores.

pub mod session;

pub use session::CurrentUser;
pub use session::keys as session_keys;
