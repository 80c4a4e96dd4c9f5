//! Integration tests for the login gate.

#![allow(clippy::unwrap_used)]

use bazar_integration_tests::TestServer;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;

async fn submit_login(server: &TestServer, client: &Client, user: &str, password: &str) -> Response {
    client
        .post(server.url("/login"))
        .form(&[("usuario", user), ("contraseña", password)])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_page_shows_form() {
    let server = TestServer::start().await;
    let (status, body) = server.get_text(&server.client(), "/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="usuario""#));
    assert!(body.contains(r#"name="contraseña""#));
}

#[tokio::test]
async fn test_valid_login_sets_flag_and_redirects_home() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = submit_login(&server, &client, "admin", "1234").await;
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()["location"], "/");

    let (_, body) = server.get_text(&client, "/").await;
    assert!(body.contains("Cerrar sesión"));
    assert!(body.contains("admin"));
}

#[tokio::test]
async fn test_invalid_login_rerenders_form() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = submit_login(&server, &client, "admin", "wrong").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"name="usuario""#));
    assert!(body.contains("Iniciar sesión"));
    assert!(!body.contains("Cerrar sesión"));
}

#[tokio::test]
async fn test_login_with_missing_field_is_bad_request() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .post(server.url("/login"))
        .form(&[("usuario", "admin")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_flag_but_keeps_cart() {
    let server = TestServer::start().await;
    let client = server.client();

    server
        .post_json(&client, "/api/cart/add", &json!({ "id": 1, "qty": 2 }))
        .await;
    submit_login(&server, &client, "admin", "1234").await;

    let resp = client.get(server.url("/logout")).send().await.unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()["location"], "/");

    let (_, body) = server.get_text(&client, "/").await;
    assert!(!body.contains("Cerrar sesión"));

    let (_, cart) = server.get_json(&client, "/api/cart").await;
    assert_eq!(cart["count"], 2);
}

#[tokio::test]
async fn test_logout_without_session_redirects() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .get(server.url("/logout"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
}
