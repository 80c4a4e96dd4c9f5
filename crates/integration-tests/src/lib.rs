//! Integration test support for Bazar.
//!
//! [`TestServer`] serves the real storefront [`app`](bazar_storefront::app)
//! on an ephemeral local port, backed by a catalog written into a temporary
//! directory. Each [`Client`] from [`TestServer::client`] keeps its own
//! cookie jar, so it behaves like one browser session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazar-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::Path;

use bazar_storefront::config::StorefrontConfig;
use bazar_storefront::state::AppState;
use reqwest::{Client, StatusCode, redirect};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Product list used by most tests.
#[must_use]
pub fn fixture_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Red Shirt",
            "price": 19.99,
            "image": "/static/img/red-shirt.jpg",
            "category": "Apparel",
            "branch": "Shirts",
            "description": "Cotton shirt in bright red."
        },
        {
            "id": 2,
            "title": "Blue Cap",
            "price": 9.5,
            "category": "Apparel",
            "branch": "Hats"
        },
        {
            "id": 3,
            "title": "Taza de cerámica",
            "price": "8.75",
            "image": "/static/img/taza.jpg",
            "category": "Hogar",
            "branch": "Cocina",
            "description": "Taza esmaltada para café."
        },
        {
            "id": 4,
            "title": "Cuaderno",
            "price": 3.1,
            "category": "Papelería",
            "branch": "Cuadernos",
            "description": "Cuaderno rayado de cien hojas."
        }
    ])
}

/// Navigation categories matching [`fixture_products`].
#[must_use]
pub fn fixture_categories() -> Value {
    json!([
        { "name": "Apparel", "branches": ["Shirts", "Hats"] },
        { "name": "Hogar", "branches": ["Cocina"] },
        { "name": "Papelería", "branches": ["Cuadernos"] }
    ])
}

/// A storefront running in the test process.
pub struct TestServer {
    addr: SocketAddr,
    static_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over the fixture catalog.
    pub async fn start() -> Self {
        Self::start_with(&fixture_products(), &fixture_categories()).await
    }

    /// Start a server over the given catalog documents.
    pub async fn start_with(products: &Value, categories: &Value) -> Self {
        let static_dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_catalog(static_dir.path(), products, categories);

        let config = StorefrontConfig::local(static_dir.path());
        let app = bazar_storefront::app(AppState::new(config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            static_dir,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A client with its own session; redirects are not followed.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Replace the products file while the server is running.
    pub fn rewrite_products(&self, products: &Value) {
        let path = self.static_dir.path().join("assets/data/products.json");
        std::fs::write(path, products.to_string()).expect("Failed to rewrite products");
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json(&self, client: &Client, path: &str) -> (StatusCode, Value) {
        let resp = client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.json().await.expect("Response was not JSON"))
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post_json(&self, client: &Client, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.json().await.expect("Response was not JSON"))
    }

    /// GET `path` and return the status and body text.
    pub async fn get_text(&self, client: &Client, path: &str) -> (StatusCode, String) {
        let resp = client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn write_catalog(static_dir: &Path, products: &Value, categories: &Value) {
    let data_dir = static_dir.join("assets").join("data");
    std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
    std::fs::write(data_dir.join("products.json"), products.to_string())
        .expect("Failed to write products");
    std::fs::write(data_dir.join("categories.json"), categories.to_string())
        .expect("Failed to write categories");
}

/// Product titles listed in a rendered page, in page order.
///
/// Relies on the `<h3>` heading of each product card.
#[must_use]
pub fn listed_titles(html: &str) -> Vec<String> {
    html.split("<h3>")
        .skip(1)
        .filter_map(|chunk| chunk.split_once("</h3>"))
        .map(|(title, _)| title.to_string())
        .collect()
}
