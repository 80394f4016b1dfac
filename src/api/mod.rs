//! API routing.
//!
//! # Structure
//!
//! - [`orders`] - order placement, transitions, listings
//! - [`products`] - catalog listing
//! - [`health`] - liveness and storage checks
//!
//! [`build_app`] assembles the merged router with the tower-http
//! middleware stack; auth happens per-handler via the [`CurrentUser`]
//! extractor rather than a global navigation guard.
//!
//! [`CurrentUser`]: crate::auth::CurrentUser

pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use crate::utils::AppResult;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware).
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(orders::router())
        .merge(products::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware.
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - the storefront runs on a different origin
        .layer(CorsLayer::permissive())
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Unique ID per request, propagated to the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
