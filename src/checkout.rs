//! # Checkout Orchestrator
//!
//! Turns a cart into a placed order: validates every line against live stock,
//! freezes product snapshots and the shipping address, prices the order, and
//! reserves stock line by line with compensation on failure. There is no
//! cross-actor transaction, so atomicity is achieved by rolling back: if any
//! reservation fails mid-flight, already-reserved units are released and the
//! just-created order is deleted, leaving the system as if the checkout never
//! happened (the cart included).

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::clients::{ActorClient, AddressClient, CartClient, OrderClient, ProductClient};
use crate::framework::FrameworkError;
use crate::model::{Order, OrderCreate, OrderLine, PaymentMethod, ShippingSnapshot};
use crate::pricing::{self, PricingError};

/// How many times to regenerate the order number on a collision before
/// giving up. Collisions need two orders on the same day sharing six random
/// characters, so one retry is already rare.
const ORDER_NUMBER_ATTEMPTS: usize = 5;

const ORDER_NUMBER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One cart line that cannot be fulfilled at current stock levels.
#[derive(Debug, Clone, PartialEq)]
pub struct StockShortage {
    pub product_id: String,
    pub product_name: String,
    pub requested: u32,
    /// Units actually available right now (0 for missing or inactive products).
    pub available: u32,
}

/// Errors surfaced by the checkout flow.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// One or more lines exceed available stock. Carries *every* failing
    /// line so the customer can fix the whole cart in one pass.
    #[error("Insufficient stock for {} product(s)", .0.len())]
    InsufficientStock(Vec<StockShortage>),

    /// The shipping address is missing, inactive, or not the caller's.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Could not allocate a unique order number.
    #[error("Order number conflict: {0}")]
    Conflict(String),

    /// A downstream actor failed; the checkout was rolled back.
    #[error("Checkout failed: {0}")]
    Internal(String),
}

/// Generates a candidate order number: `ORD-YYYYMMDD-XXXXXX` where the suffix
/// is six random uppercase alphanumerics. Uniqueness is enforced by the order
/// actor, not here.
pub fn generate_order_number() -> String {
    let date = chrono::Utc::now().format("%Y%m%d");
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| ORDER_NUMBER_CHARSET[rng.random_range(0..ORDER_NUMBER_CHARSET.len())] as char)
        .collect();
    format!("ORD-{date}-{suffix}")
}

/// The checkout entry point, wired with all four actor clients.
#[derive(Clone)]
pub struct CheckoutService {
    cart_client: CartClient,
    product_client: ProductClient,
    order_client: OrderClient,
    address_client: AddressClient,
}

impl CheckoutService {
    pub fn new(
        cart_client: CartClient,
        product_client: ProductClient,
        order_client: OrderClient,
        address_client: AddressClient,
    ) -> Self {
        Self {
            cart_client,
            product_client,
            order_client,
            address_client,
        }
    }

    /// Places an order from the user's current cart.
    ///
    /// All-or-nothing: on success the order exists with every line reserved
    /// and the cart is empty; on any failure nothing is left behind.
    #[instrument(skip(self, customer_note))]
    pub async fn checkout(
        &self,
        user_id: &str,
        address_id: &str,
        payment_method: PaymentMethod,
        customer_note: Option<String>,
    ) -> Result<Order, CheckoutError> {
        // 1. Load the cart.
        let cart = self
            .cart_client
            .get(user_id.to_string())
            .await
            .map_err(|e| CheckoutError::Internal(e.to_string()))?
            .ok_or(CheckoutError::EmptyCart)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // 2. Validate every line against the live catalog, collecting ALL
        //    shortages so the customer sees the complete picture at once.
        let mut shortages = Vec::new();
        let mut lines = Vec::with_capacity(cart.lines.len());
        for line in &cart.lines {
            let product = self
                .product_client
                .get(line.product_id.clone())
                .await
                .map_err(|e| CheckoutError::Internal(e.to_string()))?;
            match product {
                Some(product) if product.is_active && product.stock >= line.quantity => {
                    lines.push(OrderLine {
                        product_id: product.id,
                        product_name: product.name,
                        product_sku: product.sku,
                        price: product.price,
                        quantity: line.quantity,
                    });
                }
                Some(product) if product.is_active => {
                    shortages.push(StockShortage {
                        product_id: product.id,
                        product_name: product.name,
                        requested: line.quantity,
                        available: product.stock,
                    });
                }
                // Deleted or deactivated since it was added to the cart.
                _ => {
                    shortages.push(StockShortage {
                        product_id: line.product_id.clone(),
                        product_name: String::new(),
                        requested: line.quantity,
                        available: 0,
                    });
                }
            }
        }
        if !shortages.is_empty() {
            return Err(CheckoutError::InsufficientStock(shortages));
        }

        // 3. Freeze the shipping address.
        let address = self
            .address_client
            .get_active(address_id, user_id)
            .await
            .map_err(|e| CheckoutError::Internal(e.to_string()))?
            .ok_or_else(|| CheckoutError::InvalidAddress(address_id.to_string()))?;
        let shipping = ShippingSnapshot::from(&address);

        // 4. Price the order.
        let priced: Vec<(Decimal, u32)> = lines
            .iter()
            .map(|line| (line.price, line.quantity))
            .collect();
        let quote = pricing::price_lines(&priced, Decimal::ZERO)?;

        // 5. Create the order, regenerating the number on a collision.
        let params = OrderCreate {
            user_id: user_id.to_string(),
            shipping,
            payment_method,
            customer_note: customer_note.unwrap_or_default(),
            lines: lines.clone(),
            subtotal: quote.subtotal,
            tax: quote.tax,
            shipping_cost: quote.shipping_cost,
            discount: quote.discount,
            total: quote.total,
            created_by: user_id.to_string(),
        };
        let order_number = self.create_order(params).await?;

        // 6. Reserve stock line by line; compensate on failure.
        for (i, line) in lines.iter().enumerate() {
            let reserved = self
                .product_client
                .reserve_stock(line.product_id.clone(), line.quantity)
                .await;
            if let Err(e) = reserved {
                self.rollback(&order_number, &lines[..i]).await;
                return Err(match e {
                    crate::product_actor::ProductError::InsufficientStock {
                        requested,
                        available,
                    } => CheckoutError::InsufficientStock(vec![StockShortage {
                        product_id: line.product_id.clone(),
                        product_name: line.product_name.clone(),
                        requested,
                        available,
                    }]),
                    other => CheckoutError::Internal(other.to_string()),
                });
            }
        }

        // 7. Empty the cart. The order stands even if this fails.
        if let Err(e) = self.cart_client.clear(user_id).await {
            warn!(user_id, error = %e, "Failed to clear cart after checkout");
        }

        let order = self
            .order_client
            .get_for(&order_number, user_id, false)
            .await
            .map_err(|e| CheckoutError::Internal(e.to_string()))?;
        info!(order_number, user_id, total = %order.total, "Checkout complete");
        Ok(order)
    }

    /// Creates the order under a fresh order number, retrying on collisions.
    async fn create_order(&self, params: OrderCreate) -> Result<String, CheckoutError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let order_number = generate_order_number();
            match self
                .order_client
                .inner()
                .create(order_number.clone(), params.clone())
                .await
            {
                Ok(order_number) => return Ok(order_number),
                Err(FrameworkError::Duplicate(n)) => {
                    warn!(order_number = %n, "Order number collision, regenerating");
                    continue;
                }
                Err(FrameworkError::Custom(msg)) => return Err(CheckoutError::Internal(msg)),
                Err(e) => return Err(CheckoutError::Internal(e.to_string())),
            }
        }
        Err(CheckoutError::Conflict(format!(
            "no unique order number after {ORDER_NUMBER_ATTEMPTS} attempts"
        )))
    }

    /// Undoes a half-finished checkout: releases every already-reserved line
    /// and deletes the order record. Failures here are logged, not surfaced;
    /// the original reservation error is the one the caller needs.
    async fn rollback(&self, order_number: &str, reserved: &[OrderLine]) {
        warn!(order_number, lines = reserved.len(), "Rolling back checkout");
        for line in reserved {
            if let Err(e) = self
                .product_client
                .release_stock(line.product_id.clone(), line.quantity)
                .await
            {
                warn!(product_id = %line.product_id, error = %e, "Rollback release failed");
            }
        }
        if let Err(e) = self.order_client.delete(order_number.to_string()).await {
            warn!(order_number, error = %e, "Rollback order delete failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_has_expected_shape() {
        let n = generate_order_number();
        let parts: Vec<&str> = n.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
