//! Order domain logic, storage-free.
//!
//! - [`transitions`] - the bipartite buyer/vendor state machine
//! - [`lines`] - line-item validation and price snapshots
//! - [`projection`] - join-row fan-in into nested order views
//! - [`error`] - the order error taxonomy
//!
//! The repositories in `db::repository` wire this logic to Postgres; the
//! logic itself never touches a connection, which is what keeps the state
//! machine and the projection unit-testable.

pub mod error;
pub mod lines;
pub mod projection;
pub mod transitions;

pub use error::{OrderError, OrderResult};
pub use lines::{LineItemRequest, PricedLine, price_lines};
pub use projection::{StatusFilter, group_rows};
pub use transitions::{ActingSide, OrderAction};
