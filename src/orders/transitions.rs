//! Order State Machine
//!
//! `pending -> confirmed -> delivering -> completed`, with `cancelled`
//! reachable from `pending` or `confirmed`. Two actors drive the machine:
//! the vendor (accept / reject / start delivery) and the buyer (pay /
//! cancel); delivery completion may come from either side.
//!
//! The buyer-pay path deliberately skips `confirmed` and lands straight on
//! `delivering`, while the vendor path goes through `confirmed`. Both
//! paths are product behavior and are kept distinct here.

use uuid::Uuid;

use super::error::OrderError;
use crate::db::models::OrderStatus;

/// A requested status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Vendor accepts a pending order.
    Accept,
    /// Vendor rejects a pending order.
    Reject,
    /// Buyer pays a single pending order; skips `confirmed`.
    Pay,
    /// Vendor starts delivering a confirmed order.
    StartDelivery,
    /// Delivery finished; vendor marks it explicitly or the buyer confirms
    /// arrival.
    Complete,
    /// Buyer cancels before delivery starts.
    Cancel,
}

/// Which party of the order may request an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActingSide {
    Buyer,
    Vendor,
    Either,
}

impl OrderAction {
    /// Action name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Reject => "reject",
            OrderAction::Pay => "pay",
            OrderAction::StartDelivery => "start delivery for",
            OrderAction::Complete => "complete",
            OrderAction::Cancel => "cancel",
        }
    }

    pub fn acting_side(self) -> ActingSide {
        match self {
            OrderAction::Accept | OrderAction::Reject | OrderAction::StartDelivery => {
                ActingSide::Vendor
            }
            OrderAction::Pay | OrderAction::Cancel => ActingSide::Buyer,
            OrderAction::Complete => ActingSide::Either,
        }
    }

    /// Statuses the order must currently be in for the action to apply.
    pub fn allowed_from(self) -> &'static [OrderStatus] {
        match self {
            OrderAction::Accept | OrderAction::Reject | OrderAction::Pay => {
                &[OrderStatus::Pending]
            }
            OrderAction::StartDelivery => &[OrderStatus::Confirmed],
            OrderAction::Complete => &[OrderStatus::Delivering],
            OrderAction::Cancel => &[OrderStatus::Pending, OrderStatus::Confirmed],
        }
    }

    /// Human-readable description of the required prior state.
    pub fn required_desc(self) -> &'static str {
        match self {
            OrderAction::Accept | OrderAction::Reject | OrderAction::Pay => "pending",
            OrderAction::StartDelivery => "confirmed",
            OrderAction::Complete => "delivering",
            OrderAction::Cancel => "pending or confirmed",
        }
    }

    /// Status the order lands on when the action succeeds.
    pub fn target(self) -> OrderStatus {
        match self {
            OrderAction::Accept => OrderStatus::Confirmed,
            OrderAction::Reject | OrderAction::Cancel => OrderStatus::Cancelled,
            OrderAction::Pay | OrderAction::StartDelivery => OrderStatus::Delivering,
            OrderAction::Complete => OrderStatus::Completed,
        }
    }
}

/// Verify the caller is the party the action requires.
///
/// Identity comes from the authenticated request, the party ids from the
/// persisted order row; a client-supplied role is never trusted here.
pub fn authorize(
    action: OrderAction,
    caller: Uuid,
    buyer_id: Uuid,
    vendor_id: Uuid,
) -> Result<(), OrderError> {
    let permitted = match action.acting_side() {
        ActingSide::Buyer => caller == buyer_id,
        ActingSide::Vendor => caller == vendor_id,
        ActingSide::Either => caller == buyer_id || caller == vendor_id,
    };
    if permitted {
        Ok(())
    } else {
        Err(OrderError::Unauthorized)
    }
}

/// Compute the status the action moves the order to, or fail with
/// [`OrderError::InvalidTransition`] naming the required prior state.
/// Never silently no-ops.
pub fn next_status(action: OrderAction, current: OrderStatus) -> Result<OrderStatus, OrderError> {
    if action.allowed_from().contains(&current) {
        Ok(action.target())
    } else {
        Err(OrderError::InvalidTransition {
            action: action.name(),
            current,
            required: action.required_desc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [OrderAction; 6] = [
        OrderAction::Accept,
        OrderAction::Reject,
        OrderAction::Pay,
        OrderAction::StartDelivery,
        OrderAction::Complete,
        OrderAction::Cancel,
    ];

    const ALL_STATUSES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn vendor_path_runs_through_confirmed() {
        assert_eq!(
            next_status(OrderAction::Accept, OrderStatus::Pending).unwrap(),
            OrderStatus::Confirmed
        );
        assert_eq!(
            next_status(OrderAction::StartDelivery, OrderStatus::Confirmed).unwrap(),
            OrderStatus::Delivering
        );
        assert_eq!(
            next_status(OrderAction::Complete, OrderStatus::Delivering).unwrap(),
            OrderStatus::Completed
        );
    }

    #[test]
    fn buyer_pay_skips_confirmed() {
        assert_eq!(
            next_status(OrderAction::Pay, OrderStatus::Pending).unwrap(),
            OrderStatus::Delivering
        );
        // Paying a confirmed order is not a thing; that path belongs to
        // the vendor's start-delivery.
        assert!(next_status(OrderAction::Pay, OrderStatus::Confirmed).is_err());
    }

    #[test]
    fn reject_and_cancel_reach_cancelled() {
        assert_eq!(
            next_status(OrderAction::Reject, OrderStatus::Pending).unwrap(),
            OrderStatus::Cancelled
        );
        assert_eq!(
            next_status(OrderAction::Cancel, OrderStatus::Pending).unwrap(),
            OrderStatus::Cancelled
        );
        assert_eq!(
            next_status(OrderAction::Cancel, OrderStatus::Confirmed).unwrap(),
            OrderStatus::Cancelled
        );
        assert!(next_status(OrderAction::Cancel, OrderStatus::Delivering).is_err());
    }

    /// Every (status, action) pair outside the transition table fails with
    /// InvalidTransition and reports the required prior state.
    #[test]
    fn full_legality_matrix() {
        for action in ALL_ACTIONS {
            for status in ALL_STATUSES {
                let result = next_status(action, status);
                if action.allowed_from().contains(&status) {
                    assert_eq!(result.unwrap(), action.target());
                } else {
                    match result {
                        Err(OrderError::InvalidTransition {
                            current, required, ..
                        }) => {
                            assert_eq!(current, status);
                            assert_eq!(required, action.required_desc());
                        }
                        other => panic!(
                            "{:?} from {:?} should be invalid, got {:?}",
                            action, status, other
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn terminal_statuses_admit_nothing() {
        for action in ALL_ACTIONS {
            assert!(next_status(action, OrderStatus::Completed).is_err());
            assert!(next_status(action, OrderStatus::Cancelled).is_err());
        }
    }

    #[test]
    fn authorization_binds_actions_to_parties() {
        let buyer = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        // Vendor-side actions
        for action in [
            OrderAction::Accept,
            OrderAction::Reject,
            OrderAction::StartDelivery,
        ] {
            assert!(authorize(action, vendor, buyer, vendor).is_ok());
            assert!(matches!(
                authorize(action, buyer, buyer, vendor),
                Err(OrderError::Unauthorized)
            ));
            assert!(authorize(action, stranger, buyer, vendor).is_err());
        }

        // Buyer-side actions
        for action in [OrderAction::Pay, OrderAction::Cancel] {
            assert!(authorize(action, buyer, buyer, vendor).is_ok());
            assert!(authorize(action, vendor, buyer, vendor).is_err());
        }

        // Completion can come from either party, never a stranger.
        assert!(authorize(OrderAction::Complete, buyer, buyer, vendor).is_ok());
        assert!(authorize(OrderAction::Complete, vendor, buyer, vendor).is_ok());
        assert!(authorize(OrderAction::Complete, stranger, buyer, vendor).is_err());
    }
}
