//! Axum router configuration with middleware.
//!
//! Every operation is a `POST` taking a JSON body; other methods on those
//! paths get `405 Method Not Allowed` with an `Allow` header.
//! Middleware: request tracing, CORS, request timeout, body size limit.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::{ConnectInfo, DefaultBodyLimit};
use axum::http::Request;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use parley_types::config::ServerConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_request(|_request: &Request<Body>, _span: &Span| {
            tracing::info!("incoming http request");
        });

    Router::new()
        .route("/users/add", post(handlers::user::create_user))
        .route("/chats/add", post(handlers::chat::create_chat))
        .route("/chats/get", post(handlers::chat::chats_by_user))
        .route("/messages/add", post(handlers::message::create_message))
        .route("/messages/get", post(handlers::message::messages_by_chat))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// Span wrapping one request, tagged with a fresh request id.
fn request_span(request: &Request<Body>) -> Span {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info_span!(
        "http_request",
        request_id = %uuid::Uuid::now_v7(),
        method = %request.method(),
        uri = %request.uri(),
        peer = %peer,
    )
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
