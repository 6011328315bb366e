//! Custom actions for the Order actor: the state-machine transitions.

use crate::model::{Order, OrderPaymentStatus, OrderStatus};

/// State-machine transitions on a placed order.
///
/// `actor` is the pre-authorized user performing the transition, recorded in
/// the history entry. Authorization itself (e.g. the admin check on
/// `Advance`) is the caller's responsibility.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Customer- or admin-initiated cancellation. Restores stock for every
    /// line whose product still exists. Legal only before shipping.
    Cancel { reason: Option<String>, actor: String },
    /// Operator-driven status move. Any target except `Cancelled` (which must
    /// go through `Cancel`), never out of a terminal status.
    Advance {
        status: OrderStatus,
        note: Option<String>,
        actor: String,
    },
    /// Marks the payment refunded. Stock is *not* restored (distinct from
    /// cancel). Legal only once paid and not cancelled/refunded.
    Refund { actor: String },
    /// Records a successful payment capture: payment status becomes paid and
    /// `paid_at` is stamped.
    MarkPaid { transaction_id: String },
}

/// Results from OrderActions.
///
/// State-machine refusals are legal outcomes carrying the information the
/// caller needs to render a precise message (current vs. requested status),
/// not transport errors.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The transition applied; carries the updated order.
    Applied(Order),
    /// The transition was refused and nothing changed.
    Rejected(OrderRejection),
}

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderRejection {
    /// The move is not legal from the current status.
    IllegalTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },
    /// Refund precondition failed (not paid, or already cancelled/refunded).
    NotRefundable {
        payment_status: OrderPaymentStatus,
        status: OrderStatus,
    },
    /// The payment is no longer pending.
    AlreadyPaid,
}
