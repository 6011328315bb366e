//! Process-level wiring: actor startup, dependency injection, tracing.

pub mod store_system;
pub mod tracing;

pub use store_system::StoreSystem;
pub use tracing::setup_tracing;
