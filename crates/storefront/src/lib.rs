//! Bazar storefront library.
//!
//! This crate provides the storefront as a library so the binary, the
//! integration tests and any embedding host build the same [`app`].
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - Catalog read from JSON files under the static directory
//! - Cart and login flag kept in a signed-cookie `tower-sessions` session
//! - Search and cart aggregation live in `bazar-core`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the storefront application.
///
/// Includes every route, static file serving, sessions, request IDs and
/// request tracing. Sentry layers are left to the caller.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(routes::page_routes())
        .merge(routes::cart_api_routes())
        .nest_service("/static", ServeDir::new(&state.config().static_dir));

    middleware::with_sessions(router, state.config())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
async fn health() -> &'static str {
    "ok"
}
