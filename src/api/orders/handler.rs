//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::OrderView;
use crate::db::repository::OrderRepository;
use crate::orders::{LineItemRequest, OrderAction, StatusFilter};
use crate::utils::AppResult;

// =============================================================================
// Payloads
// =============================================================================

/// Body of `POST /api/orders`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub vendor_id: Uuid,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<LineItemPayload>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// Query params for the vendor listing.
#[derive(Debug, Deserialize)]
pub struct VendorListQuery {
    pub filter: StatusFilter,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub count: u64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Place an order: merge into the open cart for this vendor or create one.
/// Not idempotent by design; a retried request appends its lines again.
pub async fn place_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<PlaceOrderResponse>> {
    user.require_role(Role::Buyer)?;
    payload.validate()?;

    let items: Vec<LineItemRequest> = payload
        .items
        .iter()
        .map(|i| LineItemRequest {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();

    let repo = OrderRepository::new(state.db.clone());
    let order_id = repo.place_order(user.id, payload.vendor_id, &items).await?;

    Ok(Json(PlaceOrderResponse { order_id }))
}

// =============================================================================
// Listings
// =============================================================================

/// All of the calling buyer's orders, vendor profile joined, newest first.
pub async fn list_buyer_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrderView>>> {
    user.require_role(Role::Buyer)?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.list_for_buyer(user.id).await?;
    Ok(Json(orders))
}

/// The calling vendor's orders under a named filter
/// (incoming | active | history), buyer profile joined, newest first.
pub async fn list_vendor_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<VendorListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    user.require_role(Role::Seller)?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.list_for_vendor(user.id, query.filter).await?;
    Ok(Json(orders))
}

/// Single order with items; only its buyer or vendor may see it.
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderView>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.get_order_view(id, user.id).await?;
    Ok(Json(order))
}

// =============================================================================
// Transitions
// =============================================================================

async fn apply(
    state: &ServerState,
    user: &CurrentUser,
    order_id: Uuid,
    action: OrderAction,
) -> AppResult<Json<ActionResponse>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.apply_transition(order_id, user.id, action).await?;
    Ok(Json(ActionResponse { success: true }))
}

/// Vendor accepts a pending order (pending -> confirmed).
pub async fn accept_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    user.require_role(Role::Seller)?;
    apply(&state, &user, id, OrderAction::Accept).await
}

/// Vendor rejects a pending order (pending -> cancelled).
pub async fn reject_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    user.require_role(Role::Seller)?;
    apply(&state, &user, id, OrderAction::Reject).await
}

/// Vendor starts delivery of a confirmed order (confirmed -> delivering).
pub async fn start_delivery(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    user.require_role(Role::Seller)?;
    apply(&state, &user, id, OrderAction::StartDelivery).await
}

/// Delivery finished (delivering -> completed). The vendor marks it
/// explicitly, or the buyer confirms arrival; either party of the order
/// may call this.
pub async fn complete_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    apply(&state, &user, id, OrderAction::Complete).await
}

/// Buyer pays a single pending order (pending -> delivering; the vendor
/// confirmation step is bypassed on this path).
pub async fn pay_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    user.require_role(Role::Buyer)?;
    apply(&state, &user, id, OrderAction::Pay).await
}

/// Buyer cancels before delivery starts (pending/confirmed -> cancelled).
pub async fn cancel_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    user.require_role(Role::Buyer)?;
    apply(&state, &user, id, OrderAction::Cancel).await
}

// =============================================================================
// Bulk checkout
// =============================================================================

/// Pay for everything at once: every pending order of the caller moves to
/// `delivering` in one atomic update, or none do.
pub async fn checkout_all_pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<CheckoutResponse>> {
    user.require_role(Role::Buyer)?;
    let repo = OrderRepository::new(state.db.clone());
    let count = repo.checkout_all_pending(user.id).await?;
    Ok(Json(CheckoutResponse {
        success: true,
        count,
    }))
}
