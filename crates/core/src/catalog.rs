//! Catalog records.
//!
//! The catalog is two hand-maintained JSON documents: a flat product list
//! and an ordered list of navigation categories. Both are deserialized as-is
//! and never mutated.

use serde::{Deserialize, Deserializer, Serialize};

use crate::text::{normalize_opt, normalize_text};
use crate::types::{Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog ID. Accepts `3` or `"3"` in the source file.
    #[serde(deserialize_with = "product_id_from_int_or_str")]
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    /// Top-level category, e.g. "Apparel".
    #[serde(default)]
    pub category: String,
    /// Subcategory within `category`, e.g. "Shirts".
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Normalized category, for accent-insensitive comparison.
    #[must_use]
    pub fn normalized_category(&self) -> String {
        normalize_text(&self.category)
    }

    /// Normalized branch, for accent-insensitive comparison.
    #[must_use]
    pub fn normalized_branch(&self) -> String {
        normalize_text(&self.branch)
    }

    /// Whether the normalized title or description contains `needle`.
    ///
    /// `needle` must already be normalized.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        normalize_text(&self.title).contains(needle)
            || normalize_opt(self.description.as_deref()).contains(needle)
    }

    /// Image path, or an empty string when the product has none.
    #[must_use]
    pub fn image_or_empty(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }
}

/// A navigation category and its branches, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, alias = "subcategories")]
    pub branches: Vec<String>,
}

/// Find a product by ID.
///
/// If the catalog lists an ID twice, the first entry wins.
#[must_use]
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrStr {
    Int(i32),
    Str(String),
}

fn product_id_from_int_or_str<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrStr::deserialize(deserializer)? {
        IntOrStr::Int(id) => Ok(ProductId::new(id)),
        IntOrStr::Str(s) => s
            .trim()
            .parse::<i32>()
            .map(ProductId::new)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize_full() {
        let json = r#"{
            "id": 1,
            "title": "Red Shirt",
            "price": 19.99,
            "image": "img/red-shirt.jpg",
            "category": "Apparel",
            "branch": "Shirts",
            "description": "Cotton",
            "stock": 4
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Red Shirt");
        assert_eq!(product.price.to_string(), "19.99");
        assert_eq!(product.image_or_empty(), "img/red-shirt.jpg");
        assert_eq!(product.branch, "Shirts");
    }

    #[test]
    fn test_product_deserialize_minimal() {
        let json = r#"{"id": "7", "title": "Mug", "price": "4.50"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.category, "");
        assert_eq!(product.branch, "");
        assert_eq!(product.image_or_empty(), "");
        assert!(product.description.is_none());
    }

    #[test]
    fn test_product_rejects_non_numeric_id() {
        let json = r#"{"id": "abc", "title": "Mug", "price": 1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_mentions_is_accent_insensitive() {
        let json = r#"{"id": 2, "title": "Cafetera Clásica", "price": 30,
                       "description": "Acero inoxidable"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.mentions("clasica"));
        assert!(product.mentions("inoxidable"));
        assert!(!product.mentions("tetera"));
    }

    #[test]
    fn test_category_branches_default() {
        let cats: Vec<Category> = serde_json::from_str(
            r#"[{"name": "Apparel", "branches": ["Shirts"]},
                {"name": "Hogar", "subcategories": ["Cocina"]},
                {"name": "Toys"}]"#,
        )
        .unwrap();
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0].branches, vec!["Shirts".to_string()]);
        assert_eq!(cats[1].branches, vec!["Cocina".to_string()]);
        assert!(cats[2].branches.is_empty());
    }

    #[test]
    fn test_find_product() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id": 1, "title": "A", "price": 1},
                {"id": 2, "title": "B", "price": 2}]"#,
        )
        .unwrap();
        assert_eq!(find_product(&products, ProductId::new(2)).unwrap().title, "B");
        assert!(find_product(&products, ProductId::new(9)).is_none());
    }
}
