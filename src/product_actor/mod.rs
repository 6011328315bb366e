//! Product-specific resource logic: the inventory ledger.
//!
//! The product actor owns each product's stock counter. Because the actor
//! processes messages sequentially, `Reserve` is a single indivisible
//! check-and-decrement: two checkouts racing for the last unit cannot both
//! win, and the loser observes the actually-available quantity.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = ProductClient::new(generic_client);

    (actor, client)
}
