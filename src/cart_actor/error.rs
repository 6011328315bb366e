//! Error types for the Cart actor.

use thiserror::Error;

use super::actions::CartRejection;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The user has no cart yet.
    #[error("Cart not found for user: {0}")]
    NotFound(String),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The referenced product is not purchasable.
    #[error("Product is inactive: {0}")]
    InactiveProduct(String),

    /// The cart has no line for this product.
    #[error("No cart line for product: {0}")]
    LineNotFound(String),

    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The requested quantity exceeds current stock.
    #[error("Only {available} units available for product {product_id}")]
    InsufficientStock { product_id: String, available: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl From<CartRejection> for CartError {
    fn from(rejection: CartRejection) -> Self {
        match rejection {
            CartRejection::InvalidQuantity(q) => CartError::InvalidQuantity(q),
            CartRejection::ProductNotFound(id) => CartError::ProductNotFound(id),
            CartRejection::InactiveProduct(id) => CartError::InactiveProduct(id),
            CartRejection::LineNotFound(id) => CartError::LineNotFound(id),
            CartRejection::InsufficientStock {
                product_id,
                available,
            } => CartError::InsufficientStock {
                product_id,
                available,
            },
        }
    }
}
