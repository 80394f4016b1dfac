//! Product API Module
//!
//! Read-only catalog access for the storefront. Product management is the
//! vendors' tooling's problem; the order core only ever reads.

use axum::{Json, Router, extract::State, routing::get};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::ProductView;
use crate::db::repository::ProductRepository;
use crate::utils::AppResult;

/// Product router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/products", get(list_available))
}

/// All currently available products with vendor profiles.
pub async fn list_available(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<ProductView>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.list_available().await?;
    Ok(Json(products))
}
