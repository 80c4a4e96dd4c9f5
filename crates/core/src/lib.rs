//! Bazar Core - Storefront domain logic.
//!
//! This crate provides the types and pure logic shared by the Bazar
//! components:
//! - `storefront` - Public-facing shop (listing, search, cart API)
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! sessions, no HTTP. Catalog data is handed in by the caller, which keeps
//! search and cart aggregation testable without a running server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - Product and category records as stored in the catalog JSON
//! - [`text`] - Accent-insensitive text normalization
//! - [`similarity`] - Approximate string matching with a similarity cutoff
//! - [`search`] - Shop query resolution (fuzzy category/branch inference)
//! - [`cart`] - Session cart model and aggregation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod search;
pub mod similarity;
pub mod text;
pub mod types;

pub use cart::{Cart, CartLine, CartSummary};
pub use catalog::{Category, Product};
pub use search::{Resolution, SearchOutcome, ShopQuery};
pub use similarity::{Cutoff, SimilarityError};
pub use types::*;
