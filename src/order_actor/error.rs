//! Error types for the Order actor.

use thiserror::Error;

use crate::model::{OrderPaymentStatus, OrderStatus};

use super::actions::OrderRejection;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found (or is not visible to the caller).
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The requested transition is not legal from the current status.
    #[error("Order cannot move from {current} to {requested}")]
    IllegalTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    /// The order cannot be refunded in its current state.
    #[error("Order cannot be refunded (payment status {payment_status}, status {status})")]
    NotRefundable {
        payment_status: OrderPaymentStatus,
        status: OrderStatus,
    },

    /// The payment is no longer pending.
    #[error("Payment is not pending: {0}")]
    AlreadyPaid(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl OrderError {
    /// Maps a state-machine refusal for a given order to the client-facing error.
    pub fn from_rejection(order_number: &str, rejection: OrderRejection) -> Self {
        match rejection {
            OrderRejection::IllegalTransition { current, requested } => {
                OrderError::IllegalTransition { current, requested }
            }
            OrderRejection::NotRefundable {
                payment_status,
                status,
            } => OrderError::NotRefundable {
                payment_status,
                status,
            },
            OrderRejection::AlreadyPaid => OrderError::AlreadyPaid(order_number.to_string()),
        }
    }
}
