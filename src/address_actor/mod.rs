//! Address-book resource logic.
//!
//! Addresses are an external collaborator from the checkout core's point of
//! view: the orchestrator only reads one active, user-owned address and
//! freezes its fields onto the order. The CRUD surface lives here so the
//! whole flow runs in-process.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AddressClient;
use crate::framework::ResourceActor;
use crate::model::Address;

/// Creates a new Address actor and its client.
pub fn new() -> (ResourceActor<Address>, AddressClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = AddressClient::new(generic_client);

    (actor, client)
}
