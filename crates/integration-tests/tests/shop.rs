//! Integration tests for the shop listing, product pages and shared layout.

#![allow(clippy::unwrap_used)]

use bazar_integration_tests::{TestServer, listed_titles};
use reqwest::StatusCode;

async fn titles(server: &TestServer, path: &str) -> Vec<String> {
    let (status, body) = server.get_text(&server.client(), path).await;
    assert_eq!(status, StatusCode::OK, "GET {path}");
    listed_titles(&body)
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_home_lists_full_catalog() {
    let server = TestServer::start().await;
    assert_eq!(
        titles(&server, "/").await,
        ["Red Shirt", "Blue Cap", "Taza de cerámica", "Cuaderno"]
    );
}

#[tokio::test]
async fn test_empty_query_returns_everything() {
    let server = TestServer::start().await;
    let all = titles(&server, "/").await;
    assert_eq!(titles(&server, "/shop").await, all);
    assert_eq!(titles(&server, "/shop?q=&cat=&sub=").await, all);
    assert_eq!(titles(&server, "/shop?q=%20%20").await, all);
}

#[tokio::test]
async fn test_misspelled_category_matches_exact_filter() {
    let server = TestServer::start().await;
    let fuzzy = titles(&server, "/shop?q=aparel").await;
    let exact = titles(&server, "/shop?cat=Apparel").await;
    assert_eq!(fuzzy, ["Red Shirt", "Blue Cap"]);
    assert_eq!(fuzzy, exact);
}

#[tokio::test]
async fn test_category_query_ignores_case_and_accents() {
    let server = TestServer::start().await;
    assert_eq!(titles(&server, "/shop?q=HOGAR").await, ["Taza de cerámica"]);
    assert_eq!(titles(&server, "/shop?q=papeleria").await, ["Cuaderno"]);
}

#[tokio::test]
async fn test_branch_query_narrows_to_branch() {
    let server = TestServer::start().await;
    assert_eq!(titles(&server, "/shop?q=hats").await, ["Blue Cap"]);
}

#[tokio::test]
async fn test_text_query_searches_titles_and_descriptions() {
    let server = TestServer::start().await;
    assert_eq!(titles(&server, "/shop?q=CERAMICA").await, ["Taza de cerámica"]);
    assert_eq!(titles(&server, "/shop?q=rayado").await, ["Cuaderno"]);
    assert!(titles(&server, "/shop?q=zzzz").await.is_empty());
}

#[tokio::test]
async fn test_exact_filters_apply_after_query() {
    let server = TestServer::start().await;
    assert!(titles(&server, "/shop?q=taza&cat=Apparel").await.is_empty());
    assert_eq!(
        titles(&server, "/shop?cat=Apparel&sub=Shirts").await,
        ["Red Shirt"]
    );
    // Filters compare raw values.
    assert!(titles(&server, "/shop?cat=apparel").await.is_empty());
}

#[tokio::test]
async fn test_no_results_message() {
    let server = TestServer::start().await;
    let (status, body) = server.get_text(&server.client(), "/shop?q=zzzz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No encontramos productos"));
}

// ============================================================================
// Product Pages
// ============================================================================

#[tokio::test]
async fn test_product_page_renders_product() {
    let server = TestServer::start().await;
    let (status, body) = server.get_text(&server.client(), "/product/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Red Shirt"));
    assert!(body.contains("$19.99"));
    assert!(body.contains("Cotton shirt in bright red."));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    for path in ["/product/99", "/product/abc", "/product/+1", "/product/-1"] {
        let (status, body) = server.get_text(&server.client(), path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {path}");
        assert_eq!(body, "<h2>Producto no encontrado</h2>");
    }
}

// ============================================================================
// Layout & Plumbing
// ============================================================================

#[tokio::test]
async fn test_navigation_lists_categories_and_branches() {
    let server = TestServer::start().await;
    let (_, body) = server.get_text(&server.client(), "/about").await;
    assert!(body.contains(r#"href="/shop?cat=Hogar""#));
    assert!(body.contains(r#"href="/shop?cat=Apparel&#38;sub=Shirts""#));
    assert!(body.contains(r#"href="/shop?cat=Papeler%C3%ADa""#));
}

#[tokio::test]
async fn test_static_pages_render() {
    let server = TestServer::start().await;
    let client = server.client();
    for path in ["/cart", "/checkout", "/about", "/contact", "/become-seller", "/login"] {
        let (status, body) = server.get_text(&client, path).await;
        assert_eq!(status, StatusCode::OK, "GET {path}");
        assert!(body.contains("</html>"), "GET {path}");
    }
}

#[tokio::test]
async fn test_health_and_request_id() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .get(server.url("/health"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-request-id"], "abc-123");
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let server = TestServer::start().await;
    let (status, body) = server
        .get_text(&server.client(), "/static/assets/data/categories.json")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Apparel"));
}

#[tokio::test]
async fn test_unreadable_catalog_is_server_error() {
    let server = TestServer::start().await;
    server.rewrite_products(&serde_json::json!({ "not": "a list" }));
    let (status, body) = server.get_text(&server.client(), "/shop").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal server error");
}
