//! # Order Client
//!
//! High-level API for the Order actor. This is also where access scoping
//! lives: customers only ever see their own orders, and a foreign order
//! number answers "not found" rather than "forbidden" so order numbers are
//! not probeable.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Order, OrderFilter, OrderPaymentStatus, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Aggregate figures across all orders, for the admin dashboard.
#[derive(Debug, Clone)]
pub struct OrderStats {
    pub total_orders: usize,
    /// Sum of totals over paid orders only.
    pub total_revenue: Decimal,
    /// Mean total of paid orders, zero when nothing is paid yet.
    pub average_order_value: Decimal,
    pub orders_by_status: Vec<StatusCount>,
    /// The ten most recently placed orders, newest first.
    pub recent_orders: Vec<Order>,
}

/// Number of orders currently in one status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    async fn act(&self, order_number: &str, action: OrderAction) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(order_number.to_string(), action)
            .await
        {
            Ok(OrderActionResult::Applied(order)) => Ok(order),
            Ok(OrderActionResult::Rejected(rejection)) => {
                Err(OrderError::from_rejection(order_number, rejection))
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Fetches an order, scoped to its owner unless `is_admin`.
    #[instrument(skip(self))]
    pub async fn get_for(
        &self,
        order_number: &str,
        actor: &str,
        is_admin: bool,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .get(order_number.to_string())
            .await
            .map_err(Self::map_error)?;
        match order {
            Some(order) if is_admin || order.user_id == actor => Ok(order),
            _ => Err(OrderError::NotFound(order_number.to_string())),
        }
    }

    /// Lists orders newest-first: the actor's own, or all of them for admins.
    #[instrument(skip(self))]
    pub async fn list_for(&self, actor: &str, is_admin: bool) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let filter = if is_admin {
            OrderFilter::default()
        } else {
            OrderFilter {
                user_id: Some(actor.to_string()),
            }
        };
        let mut orders = self.inner.list(filter).await.map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Customer-initiated cancellation. Allowed while the order is pending or
    /// processing; reserved stock flows back to the products.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        order_number: &str,
        actor: &str,
        is_admin: bool,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.get_for(order_number, actor, is_admin).await?;
        self.act(
            order_number,
            OrderAction::Cancel {
                reason,
                actor: actor.to_string(),
            },
        )
        .await
    }

    /// Admin-driven fulfillment step: moves the order to `status`.
    ///
    /// Cancellation is not reachable this way; use [`cancel`](Self::cancel).
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_number: &str,
        status: OrderStatus,
        note: Option<String>,
        actor: &str,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.act(
            order_number,
            OrderAction::Advance {
                status,
                note,
                actor: actor.to_string(),
            },
        )
        .await
    }

    /// Refunds a paid order. Stock is NOT restored: refunded goods are
    /// handled by a separate returns flow, if at all.
    #[instrument(skip(self))]
    pub async fn refund(&self, order_number: &str, actor: &str) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.act(
            order_number,
            OrderAction::Refund {
                actor: actor.to_string(),
            },
        )
        .await
    }

    /// Records a successful payment capture against a pending-payment order.
    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        order_number: &str,
        transaction_id: String,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.act(order_number, OrderAction::MarkPaid { transaction_id })
            .await
    }

    /// Attaches or replaces the internal admin note.
    pub async fn set_admin_note(
        &self,
        order_number: &str,
        note: String,
    ) -> Result<Order, OrderError> {
        self.update(
            order_number.to_string(),
            OrderUpdate {
                admin_note: Some(note),
            },
        )
        .await
    }

    /// Computes dashboard aggregates over every order in the system.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<OrderStats, OrderError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .list(OrderFilter::default())
            .await
            .map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let paid: Vec<&Order> = orders
            .iter()
            .filter(|o| o.payment_status == OrderPaymentStatus::Paid)
            .collect();
        let total_revenue: Decimal = paid.iter().map(|o| o.total).sum();
        let average_order_value = if paid.is_empty() {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(paid.len() as u64)).round_dp(2)
        };

        let orders_by_status = OrderStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: orders.iter().filter(|o| o.status == status).count(),
            })
            .collect();

        let total_orders = orders.len();
        orders.truncate(10);

        Ok(OrderStats {
            total_orders,
            total_revenue,
            average_order_value,
            orders_by_status,
            recent_orders: orders,
        })
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(order_number) => OrderError::NotFound(order_number),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
