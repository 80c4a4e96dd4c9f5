//! Session cart model and aggregation.
//!
//! The cart itself is only a map of product key to quantity; it knows
//! nothing about titles or prices. [`Cart::summarize`] joins it against the
//! catalog on every read, so prices always reflect the current catalog and
//! entries for products that have since disappeared are dropped from the
//! view (but left in the cart).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Quantity assumed when a client adds an item without one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// A shopping cart: product key → quantity.
///
/// Keys are the decimal string form of a [`ProductId`] (see
/// [`ProductId::cart_key`]). Quantities are always positive; an entry that
/// would drop to zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity held for `key`, zero if absent.
    #[must_use]
    pub fn quantity(&self, key: &str) -> u32 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Iterate `(key, quantity)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, q)| (k.as_str(), *q))
    }

    /// Add `quantity` units of `key`.
    ///
    /// A missing or zero quantity adds [`DEFAULT_ADD_QUANTITY`]. Negative
    /// quantities subtract; the result is clamped at zero and a zero entry
    /// is removed.
    pub fn add(&mut self, key: &str, quantity: Option<i64>) {
        let delta = match quantity {
            None | Some(0) => DEFAULT_ADD_QUANTITY,
            Some(n) => n,
        };
        let current = i64::from(self.quantity(key));
        let updated = current.saturating_add(delta).clamp(0, i64::from(u32::MAX));

        match u32::try_from(updated) {
            Ok(0) | Err(_) => {
                self.entries.remove(key);
            }
            Ok(qty) => {
                self.entries.insert(key.to_owned(), qty);
            }
        }
    }

    /// Remove `key` entirely, whatever its quantity.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Join the cart against `products` and compute totals.
    ///
    /// Entries whose key is not in the catalog are skipped. If the catalog
    /// lists an ID twice, the later entry wins.
    #[must_use]
    pub fn summarize(&self, products: &[Product]) -> CartSummary {
        let by_key: HashMap<String, &Product> =
            products.iter().map(|p| (p.id.cart_key(), p)).collect();

        let items: Vec<CartLine> = self
            .entries()
            .filter_map(|(key, qty)| by_key.get(key).map(|p| CartLine::new(p, qty)))
            .collect();

        CartSummary::from_items(items)
    }
}

/// A reference to a product as sent by API clients: `1` or `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Number(i64),
    Text(String),
}

impl ProductRef {
    /// The cart key this reference addresses.
    #[must_use]
    pub fn cart_key(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One line of the aggregated cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image path, empty when the product has none.
    pub image: String,
    pub qty: u32,
}

impl CartLine {
    fn new(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image_or_empty().to_owned(),
            qty,
        }
    }

    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// The aggregated cart returned by every cart operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    /// Sum of line totals, rounded to cents.
    pub total: Price,
    /// Total number of units.
    pub count: u64,
}

impl CartSummary {
    fn from_items(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum::<Price>().round_cents();
        let count = items.iter().map(|line| u64::from(line.qty)).sum();
        Self {
            items,
            total,
            count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn catalog() -> Vec<Product> {
        serde_json::from_str(
            r#"[
            {"id": 1, "title": "Red Shirt", "price": 19.99, "category": "Apparel", "branch": "Shirts",
             "image": "img/shirt.jpg"},
            {"id": 2, "title": "Mug", "price": "4.50", "category": "Hogar", "branch": "Cocina"},
            {"id": 3, "title": "Pen", "price": "0.333", "category": "Oficina", "branch": "Escritura"}
        ]"#,
        )
        .unwrap()
    }

    fn price(s: &str) -> Price {
        Price::new(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = Cart::new().summarize(&catalog());
        assert!(summary.is_empty());
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.count, 0);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"items": [], "total": 0.0, "count": 0})
        );
    }

    #[test]
    fn test_add_twice_increments() {
        let mut cart = Cart::new();
        cart.add("1", Some(2));
        let summary = cart.summarize(&catalog());
        assert_eq!(summary.total, price("39.98"));
        assert_eq!(summary.count, 2);

        cart.add("1", None);
        assert_eq!(cart.quantity("1"), 3);
    }

    #[test]
    fn test_add_defaults_missing_or_zero_quantity_to_one() {
        let mut cart = Cart::new();
        cart.add("2", None);
        cart.add("2", Some(0));
        assert_eq!(cart.quantity("2"), 2);
    }

    #[test]
    fn test_negative_quantity_is_clamped_and_removed() {
        let mut cart = Cart::new();
        cart.add("2", Some(3));
        cart.add("2", Some(-1));
        assert_eq!(cart.quantity("2"), 2);

        cart.add("2", Some(-10));
        assert_eq!(cart.quantity("2"), 0);
        assert!(cart.is_empty());

        cart.add("1", Some(-5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_deletes_whole_entry() {
        let mut cart = Cart::new();
        cart.add("1", Some(5));
        cart.add("2", Some(1));
        cart.remove("1");
        assert_eq!(cart.quantity("1"), 0);
        assert_eq!(cart.quantity("2"), 1);

        // Removing an absent key is a no-op
        cart.remove("99");
        assert_eq!(cart.entries().count(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_summary() {
        let products = catalog();
        let mut cart = Cart::new();
        cart.add("2", Some(2));
        let before = cart.summarize(&products);

        cart.add("1", Some(4));
        cart.remove("1");
        assert_eq!(cart.summarize(&products), before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add("1", Some(1));
        cart.add("2", Some(1));
        cart.clear();
        assert_eq!(cart.summarize(&catalog()), CartSummary::default());
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut cart = Cart::new();
        cart.add("42", Some(3));
        cart.add("not-a-number", Some(1));
        let summary = cart.summarize(&catalog());
        assert!(summary.items.is_empty());
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.count, 0);

        cart.add("2", Some(1));
        let summary = cart.summarize(&catalog());
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, price("4.50"));
    }

    #[test]
    fn test_total_is_sum_of_lines_rounded() {
        let mut cart = Cart::new();
        cart.add("1", Some(1));
        cart.add("3", Some(5));
        let summary = cart.summarize(&catalog());
        // 19.99 + 5 * 0.333 = 21.655 -> 21.66
        assert_eq!(summary.total, price("21.66"));
        assert_eq!(summary.count, 6);
    }

    #[test]
    fn test_line_fields() {
        let mut cart = Cart::new();
        cart.add("1", Some(2));
        cart.add("2", Some(1));
        let summary = cart.summarize(&catalog());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value["items"][0],
            json!({"id": 1, "title": "Red Shirt", "price": 19.99, "image": "img/shirt.jpg", "qty": 2})
        );
        assert_eq!(value["items"][1]["image"], json!(""));
        assert_eq!(value["total"], json!(44.48));
    }

    #[test]
    fn test_product_ref_keys() {
        let by_number: ProductRef = serde_json::from_value(json!(7)).unwrap();
        let by_text: ProductRef = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(by_number.cart_key(), "7");
        assert_eq!(by_text.cart_key(), "7");
        assert!(serde_json::from_value::<ProductRef>(json!(null)).is_err());
    }

    #[test]
    fn test_cart_session_round_trip() {
        let mut cart = Cart::new();
        cart.add("1", Some(2));
        let stored = serde_json::to_value(&cart).unwrap();
        assert_eq!(stored, json!({"1": 2}));
        let restored: Cart = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, cart);
    }
}
