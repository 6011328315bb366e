//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! These are the surface the rest of the system talks to: they hide raw
//! message passing, translate framework errors into precise domain errors,
//! and enforce access scoping (owner-or-admin) where it matters.

pub mod actor_client;
pub mod address_client;
pub mod cart_client;
pub mod order_client;
pub mod product_client;

pub use actor_client::*;
pub use address_client::*;
pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
