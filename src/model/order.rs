//! Orders: the immutable-once-created record of a purchase.
//!
//! An [`Order`] owns its line-item snapshots, the frozen shipping address, the
//! payment record, and an append-only status history. After creation only the
//! status fields, note fields, and the lifecycle timestamps ever change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::model::Address;

/// Fulfillment status. The happy path is
/// `pending → processing → shipped → delivered`; `cancelled` is reachable only
/// through the cancel operation, and `delivered`/`cancelled`/`refunded` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// All statuses, in lifecycle order. Used for stats buckets.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

/// Money-side status of an order, orthogonal to fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl fmt::Display for OrderPaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderPaymentStatus::Pending => "pending",
            OrderPaymentStatus::Paid => "paid",
            OrderPaymentStatus::Failed => "failed",
            OrderPaymentStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

/// How the customer chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Cash,
}

/// Status of the payment record itself (gateway-side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Immutable snapshot of one purchased line.
///
/// Name, SKU, and unit price are copied from the product at checkout time and
/// never re-derived from the live catalog, so later price edits cannot
/// retroactively change a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub product_sku: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The shipping address frozen onto the order at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSnapshot {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&Address> for ShippingSnapshot {
    fn from(address: &Address) -> Self {
        Self {
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

/// The single payment record attached to an order (1:1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub transaction_id: String,
    pub payment_intent_id: String,
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn pending(method: PaymentMethod, amount: Decimal) -> Self {
        Self {
            method,
            status: PaymentStatus::Pending,
            amount,
            transaction_id: String::new(),
            payment_intent_id: String::new(),
            metadata: HashMap::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// One append-only audit entry recording how the order reached a status.
/// Entries are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    pub note: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A placed order.
///
/// Created exactly once per checkout; the monetary fields are frozen then and
/// never recomputed from mutable product prices. The order's actor id is its
/// globally unique `order_number` (`ORD-YYYYMMDD-XXXXXX`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub payment_status: OrderPaymentStatus,

    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,

    pub shipping: ShippingSnapshot,
    pub customer_note: String,
    pub admin_note: String,

    pub lines: Vec<OrderLine>,
    pub payment: Payment,
    pub history: Vec<StatusHistoryEntry>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// An order can be cancelled only before it ships.
    pub fn can_cancel(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Processing)
    }

    /// An order can be refunded only once paid, and never after
    /// cancellation or a prior refund.
    pub fn can_refund(&self) -> bool {
        self.payment_status == OrderPaymentStatus::Paid
            && !matches!(self.status, OrderStatus::Cancelled | OrderStatus::Refunded)
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Recomputes the total from stored parts. Must always equal `total`.
    pub fn derived_total(&self) -> Decimal {
        let line_sum: Decimal = self.lines.iter().map(OrderLine::line_total).sum();
        line_sum + self.tax + self.shipping_cost - self.discount
    }

    /// Appends an audit entry. The history is append-only; the most recent
    /// entry's status always equals the order's current status.
    pub fn push_history(&mut self, status: OrderStatus, note: impl Into<String>, actor: impl Into<String>) {
        self.history.push(StatusHistoryEntry {
            status,
            note: note.into(),
            created_by: actor.into(),
            created_at: Utc::now(),
        });
    }
}

/// Payload for creating a new order. Assembled by the checkout orchestrator;
/// the order number is supplied separately as the entity id.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub shipping: ShippingSnapshot,
    pub payment_method: PaymentMethod,
    pub customer_note: String,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub created_by: String,
}

/// Payload for updating an order's mutable note field.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub admin_note: Option<String>,
}

/// Filter for order listing: all orders, or one user's.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<String>,
}
