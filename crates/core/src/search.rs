//! Shop query resolution.
//!
//! A free-text query is first matched approximately against the catalog's
//! category names, then its branch names. A hit narrows the listing to that
//! whole category (or branch); a miss falls back to a substring search over
//! titles and descriptions. The explicit `cat`/`sub` filters from the shop
//! navigation are applied afterwards as exact matches.

use std::fmt;

use crate::catalog::Product;
use crate::similarity::{Cutoff, close_match};
use crate::text::normalize_text;

/// Parameters of a shop listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopQuery {
    /// Free-text query.
    pub q: String,
    /// Exact category name.
    pub category: Option<String>,
    /// Exact branch name.
    pub branch: Option<String>,
}

impl ShopQuery {
    /// Build a query from raw request parameters.
    ///
    /// Surrounding whitespace is trimmed; empty filters count as absent.
    #[must_use]
    pub fn new(q: &str, category: Option<&str>, branch: Option<&str>) -> Self {
        let non_empty = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            q: q.trim().to_owned(),
            category: non_empty(category),
            branch: non_empty(branch),
        }
    }

    /// Whether this query leaves the catalog unfiltered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.category.is_none() && self.branch.is_none()
    }
}

/// How the free-text part of a query was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No free-text query.
    All,
    /// Query matched this (normalized) category.
    Category(String),
    /// Query matched this (normalized) branch.
    Branch(String),
    /// Query used as a substring over titles and descriptions.
    Text(String),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Category(c) => write!(f, "category:{c}"),
            Self::Branch(b) => write!(f, "branch:{b}"),
            Self::Text(t) => write!(f, "text:{t}"),
        }
    }
}

/// Products left after applying a [`ShopQuery`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub products: Vec<Product>,
    pub resolution: Resolution,
}

/// Filter `products` by `query`.
///
/// Never fails; an unmatched query yields an empty list.
#[must_use]
pub fn search(products: Vec<Product>, query: &ShopQuery) -> SearchOutcome {
    let (mut products, resolution) = resolve_text(products, &query.q);

    if let Some(category) = &query.category {
        products.retain(|p| &p.category == category);
    }
    if let Some(branch) = &query.branch {
        products.retain(|p| &p.branch == branch);
    }

    SearchOutcome {
        products,
        resolution,
    }
}

fn resolve_text(products: Vec<Product>, q: &str) -> (Vec<Product>, Resolution) {
    let needle = normalize_text(q);
    if needle.is_empty() {
        return (products, Resolution::All);
    }

    let categories: Vec<String> = products.iter().map(Product::normalized_category).collect();
    let branches: Vec<String> = products.iter().map(Product::normalized_branch).collect();

    let category_hit = close_match(&needle, categories.iter().map(String::as_str), Cutoff::SEARCH);
    if let Some(hit) = category_hit {
        let hit = hit.to_owned();
        let kept = keep_where(products, &categories, &hit);
        return (kept, Resolution::Category(hit));
    }

    let branch_hit = close_match(&needle, branches.iter().map(String::as_str), Cutoff::SEARCH);
    if let Some(hit) = branch_hit {
        let hit = hit.to_owned();
        let kept = keep_where(products, &branches, &hit);
        return (kept, Resolution::Branch(hit));
    }

    let kept = products
        .into_iter()
        .filter(|p| p.mentions(&needle))
        .collect();
    (kept, Resolution::Text(needle))
}

/// Keep products whose parallel `keys` entry equals `wanted`.
fn keep_where(products: Vec<Product>, keys: &[String], wanted: &str) -> Vec<Product> {
    products
        .into_iter()
        .zip(keys)
        .filter(|(_, key)| key.as_str() == wanted)
        .map(|(product, _)| product)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn catalog() -> Vec<Product> {
        serde_json::from_str(
            r#"[
            {"id": 1, "title": "Red Shirt", "price": 19.99, "category": "Apparel", "branch": "Shirts",
             "description": "Soft cotton tee"},
            {"id": 2, "title": "Blue Jeans", "price": 49.5, "category": "Apparel", "branch": "Pants"},
            {"id": 3, "title": "Cafetera", "price": 30, "category": "Electrodomésticos", "branch": "Cocina",
             "description": "Prepara café espresso"},
            {"id": 4, "title": "Licuadora", "price": 25, "category": "Electrodomésticos", "branch": "Cocina"},
            {"id": 5, "title": "Taladro", "price": 80, "category": "Herramientas", "branch": "Eléctricas"},
            {"id": 6, "title": "Martillo", "price": 12, "category": "Herramientas", "branch": "Manuales",
             "description": "Mango de madera"}
        ]"#,
        )
        .unwrap()
    }

    fn ids(outcome: &SearchOutcome) -> Vec<i32> {
        outcome.products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let outcome = search(catalog(), &ShopQuery::default());
        assert_eq!(ids(&outcome), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(outcome.resolution, Resolution::All);
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let query = ShopQuery::new("   ", Some(" "), None);
        assert!(query.is_empty());
        assert_eq!(ids(&search(catalog(), &query)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_exact_category_name_case_and_accent_insensitive() {
        for q in ["Apparel", "APPAREL", "electrodomesticos", "ELECTRODOMÉSTICOS"] {
            let outcome = search(catalog(), &ShopQuery::new(q, None, None));
            let expected: Vec<i32> = catalog()
                .iter()
                .filter(|p| p.normalized_category() == normalize_text(q))
                .map(|p| p.id.as_i32())
                .collect();
            assert_eq!(ids(&outcome), expected, "query {q}");
        }
    }

    #[test]
    fn test_misspelled_category_matches_exact_filter() {
        let fuzzy = search(catalog(), &ShopQuery::new("aparel", None, None));
        let exact = search(catalog(), &ShopQuery::new("", Some("Apparel"), None));
        assert_eq!(ids(&fuzzy), ids(&exact));
        assert_eq!(fuzzy.resolution, Resolution::Category("apparel".to_string()));
    }

    #[test]
    fn test_branch_match_when_no_category_matches() {
        let outcome = search(catalog(), &ShopQuery::new("cocina", None, None));
        assert_eq!(ids(&outcome), vec![3, 4]);
        assert_eq!(outcome.resolution, Resolution::Branch("cocina".to_string()));

        let outcome = search(catalog(), &ShopQuery::new("electricas", None, None));
        assert_eq!(ids(&outcome), vec![5]);
    }

    #[test]
    fn test_category_match_wins_over_branch() {
        // "shirts" is a branch, but with a category of the same name the
        // category takes precedence.
        let mut products = catalog();
        products.push(
            serde_json::from_str(
                r#"{"id": 7, "title": "Shirt Rack", "price": 99, "category": "Shirts", "branch": "Racks"}"#,
            )
            .unwrap(),
        );
        let outcome = search(products, &ShopQuery::new("shirts", None, None));
        assert_eq!(ids(&outcome), vec![7]);
    }

    #[test]
    fn test_substring_fallback_over_title_and_description() {
        let outcome = search(catalog(), &ShopQuery::new("jeans", None, None));
        assert_eq!(ids(&outcome), vec![2]);
        assert_eq!(outcome.resolution, Resolution::Text("jeans".to_string()));

        let outcome = search(catalog(), &ShopQuery::new("CAFÉ", None, None));
        assert_eq!(ids(&outcome), vec![3]);

        let outcome = search(catalog(), &ShopQuery::new("madera", None, None));
        assert_eq!(ids(&outcome), vec![6]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let outcome = search(catalog(), &ShopQuery::new("submarino", None, None));
        assert!(outcome.products.is_empty());
    }

    #[test]
    fn test_exact_filters_apply_after_fuzzy_stage() {
        let outcome = search(
            catalog(),
            &ShopQuery::new("apparel", Some("Apparel"), Some("Pants")),
        );
        assert_eq!(ids(&outcome), vec![2]);

        // Fuzzy stage picks Apparel, exact filter asks for another category
        let outcome = search(catalog(), &ShopQuery::new("apparel", Some("Herramientas"), None));
        assert!(outcome.products.is_empty());
    }

    #[test]
    fn test_exact_filters_are_case_sensitive() {
        let outcome = search(catalog(), &ShopQuery::new("", Some("apparel"), None));
        assert!(outcome.products.is_empty());

        let outcome = search(catalog(), &ShopQuery::new("", None, Some("Cocina")));
        assert_eq!(ids(&outcome), vec![3, 4]);
    }

    #[test]
    fn test_products_keep_catalog_order() {
        let outcome = search(catalog(), &ShopQuery::new("herramientas", None, None));
        assert_eq!(
            outcome.products.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ProductId::new(5), ProductId::new(6)]
        );
    }
}
