//! Pure domain data structures (entities and DTOs) implementing the
//! [`ActorEntity`](crate::framework::ActorEntity) trait via the `*_actor` modules.

pub mod address;
pub mod cart;
pub mod order;
pub mod product;

pub use address::*;
pub use cart::*;
pub use order::*;
pub use product::*;
