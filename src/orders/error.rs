//! Order domain error taxonomy.

use thiserror::Error;
use uuid::Uuid;

use crate::db::models::OrderStatus;

/// Domain-level Result type used by the order repositories and logic.
pub type OrderResult<T> = Result<T, OrderError>;

/// Errors produced by the order core.
///
/// Every variant aborts the enclosing transaction; no partial order or
/// item rows survive a failure.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// A requested line references a product the target vendor does not
    /// own, or one that is not currently for sale.
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    /// Caller is neither the buyer nor the vendor of the order, or is the
    /// wrong party for the requested action.
    #[error("Caller is not authorized for this order")]
    Unauthorized,

    /// The persisted status does not permit the requested transition. The
    /// message names the required prior state.
    #[error("Cannot {action} an order in status '{current}': requires '{required}'")]
    InvalidTransition {
        action: &'static str,
        current: OrderStatus,
        required: &'static str,
    },

    #[error("No pending orders to check out")]
    NothingToCheckout,

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
