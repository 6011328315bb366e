//! Cart-specific resource logic: the per-user pre-purchase aggregate.
//!
//! Carts are keyed by the owning user id (one cart per user) and created
//! lazily on first mutation. Every mutation entry point funnels through the
//! same line invariants: quantity at least 1, product live and active, and an
//! advisory stock check against the current counter.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new() -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = CartClient::new(generic_client);

    (actor, client)
}
