//! Custom actions for the Cart actor.
//!
//! All cart mutations (add, set quantity, remove, clear, bulk upsert) are
//! expressed as actions so they run inside the cart actor's serialized loop
//! and share one validation path.

use crate::model::Cart;

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` units of a product, merging with an existing line.
    AddItem { product_id: String, quantity: u32 },
    /// Replaces the quantity of an existing line.
    SetQuantity { product_id: String, quantity: u32 },
    /// Removes a line entirely.
    RemoveItem { product_id: String },
    /// Deletes all lines. The cart itself persists.
    Clear,
    /// Bulk upsert: each entry replaces (or creates) that product's line.
    /// Entries are validated independently; failures don't abort the rest.
    SetItems(Vec<CartLineInput>),
}

/// One entry of a bulk upsert.
#[derive(Debug, Clone)]
pub struct CartLineInput {
    pub product_id: String,
    pub quantity: u32,
}

/// Results from CartActions.
///
/// Business rejections (bad quantity, missing product, not enough stock) are
/// data, not transport errors, so the client can map them to precise
/// [`CartError`](super::CartError) variants.
#[derive(Debug, Clone)]
pub enum CartActionResult {
    /// The mutation applied; carries the updated cart.
    Updated(Cart),
    /// The mutation was refused and nothing changed.
    Rejected(CartRejection),
    /// Bulk outcome: the cart after applying the valid entries, plus one
    /// error per rejected entry.
    Bulk {
        cart: Cart,
        errors: Vec<BulkItemError>,
    },
}

/// Why a cart mutation (or one bulk entry) was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum CartRejection {
    /// Quantity must be at least 1.
    InvalidQuantity(u32),
    /// The product does not exist.
    ProductNotFound(String),
    /// The product exists but is not purchasable.
    InactiveProduct(String),
    /// The cart has no line for this product.
    LineNotFound(String),
    /// The requested quantity exceeds current stock.
    InsufficientStock { product_id: String, available: u32 },
}

/// A rejected entry of a bulk upsert.
#[derive(Debug, Clone)]
pub struct BulkItemError {
    pub product_id: String,
    pub rejection: CartRejection,
}
