//! Custom actions for the Product actor: the stock-counter contract.
//!
//! These are the only operations allowed to mutate a product's stock.
//! Callers are responsible for exactly-once invocation per logical event
//! (one `Reserve` per order line at checkout, one `Release` per line on
//! cancellation).

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Atomically checks `stock >= quantity` and decrements in one step.
    Reserve(u32),
    /// Atomically increments stock (used on order cancellation or restock).
    Release(u32),
}

/// Results from ProductActions.
///
/// A failed reservation is a legal business outcome, not a transport error,
/// so `Insufficient` carries the available quantity back to the caller
/// instead of collapsing it into an error string.
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Result from CheckStock - the current stock level.
    Stock(u32),
    /// The requested quantity was reserved.
    Reserved,
    /// The reservation was refused; `available` is what's actually left.
    Insufficient { available: u32 },
    /// The quantity was returned to stock.
    Released,
}
