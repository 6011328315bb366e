//! Per-user shopping cart: the mutable pre-purchase selection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's shopping cart.
///
/// Carts are 1:1 with users and keyed by the owning user id. The cart is
/// created lazily on the first mutation and persists across clears; only its
/// lines come and go. Totals are never stored here — see [`CartView`] for the
/// derived read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }
}

/// One product selection inside a cart. Unique per (cart, product);
/// quantity is always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Payload for creating a cart. The id (owning user) is supplied separately.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

/// Derived, read-only view of a cart priced against the live catalog.
///
/// Unit prices and line totals come from the *current* product price at read
/// time; nothing here is stored. Orders freeze their own copies at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: String,
    pub lines: Vec<CartViewLine>,
    pub total_items: u32,
    pub subtotal: Decimal,
}

impl CartView {
    /// An empty view for a user with no cart yet.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            lines: Vec::new(),
            total_items: 0,
            subtotal: Decimal::ZERO,
        }
    }
}

/// One priced line in a [`CartView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartViewLine {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}
