//! User display fields surfaced through joins.
//!
//! Identity and profile management is external; the order core only needs
//! the display fields that ride along in projections.

use serde::Serialize;

/// Profile summary of an order counterpart (or product vendor).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub name: String,
    pub avatar_url: Option<String>,
}
