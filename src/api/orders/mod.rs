//! Order API Module
//!
//! All order lifecycle operations. Every route requires an authenticated
//! caller; role and party checks happen per-operation in the handlers and
//! repository.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Cart aggregation (buyer)
        .route("/", post(handler::place_order))
        // Listings
        .route("/mine", get(handler::list_buyer_orders))
        .route("/vendor", get(handler::list_vendor_orders))
        // Bulk checkout (buyer)
        .route("/checkout", post(handler::checkout_all_pending))
        // Single order detail
        .route("/{id}", get(handler::get_by_id))
        // Vendor transitions
        .route("/{id}/accept", post(handler::accept_order))
        .route("/{id}/reject", post(handler::reject_order))
        .route("/{id}/start-delivery", post(handler::start_delivery))
        // Either party
        .route("/{id}/complete", post(handler::complete_order))
        // Buyer transitions
        .route("/{id}/pay", post(handler::pay_order))
        .route("/{id}/cancel", post(handler::cancel_order))
}
