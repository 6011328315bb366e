//! Order-specific resource logic: the order state machine.
//!
//! The order actor owns every placed order and serializes transitions per
//! order: a cancel racing an admin advance cannot both apply — the loser sees
//! a precise rejection carrying the current status. Each transition mutates
//! state and appends its history entry in the same message, so the audit
//! trail can never drift from the status.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
