//! Entity trait implementation for the Order domain type.
//!
//! The order actor's context is a [`ProductClient`]: cancellation releases
//! each line's reservation back to the inventory ledger. Transitions follow
//! a strict discipline — all fallible effects run first, the entity is
//! mutated only after they succeed, and the history entry is appended in the
//! same message — so a failed transition leaves the order untouched.

use async_trait::async_trait;
use chrono::Utc;

use super::actions::{OrderAction, OrderActionResult, OrderRejection};
use crate::clients::ProductClient;
use crate::framework::ActorEntity;
use crate::model::{
    Order, OrderCreate, OrderFilter, OrderPaymentStatus, OrderStatus, OrderUpdate, Payment,
    PaymentStatus,
};
use crate::product_actor::ProductError;

#[async_trait]
impl ActorEntity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type UpdateParams = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = ProductClient;

    /// Assembles a full order from the checkout orchestrator's payload.
    ///
    /// The id is the order number. The order starts pending/pending with a
    /// pending payment of the full total and the mandatory creation history
    /// entry, satisfying the every-order-has-history invariant from birth.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.lines.is_empty() {
            return Err("order must have at least one line".to_string());
        }
        let now = Utc::now();
        let mut order = Order {
            order_number: id,
            user_id: params.user_id,
            status: OrderStatus::Pending,
            payment_status: OrderPaymentStatus::Pending,
            subtotal: params.subtotal,
            tax: params.tax,
            shipping_cost: params.shipping_cost,
            discount: params.discount,
            total: params.total,
            shipping: params.shipping,
            customer_note: params.customer_note,
            admin_note: String::new(),
            lines: params.lines,
            payment: Payment::pending(params.payment_method, params.total),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
            paid_at: None,
            shipped_at: None,
            delivered_at: None,
        };
        order.push_history(OrderStatus::Pending, "Order created", params.created_by);
        Ok(order)
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter
            .user_id
            .as_deref()
            .map_or(true, |user_id| self.user_id == user_id)
    }

    /// Only the admin note is mutable after creation.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &Self::Context) -> Result<(), String> {
        if let Some(admin_note) = update.admin_note {
            self.admin_note = admin_note;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::Cancel { reason, actor } => {
                if !self.can_cancel() {
                    return Ok(OrderActionResult::Rejected(
                        OrderRejection::IllegalTransition {
                            current: self.status,
                            requested: OrderStatus::Cancelled,
                        },
                    ));
                }

                // Release stock before mutating: a transport failure here
                // must leave the order still cancellable.
                for line in &self.lines {
                    match ctx
                        .release_stock(line.product_id.clone(), line.quantity)
                        .await
                    {
                        Ok(()) => {}
                        // Product deleted since purchase: nothing to restore.
                        Err(ProductError::NotFound(_)) => {}
                        Err(e) => return Err(e.to_string()),
                    }
                }

                self.status = OrderStatus::Cancelled;
                self.updated_at = Utc::now();
                let note = reason.unwrap_or_else(|| "Order cancelled by customer".to_string());
                self.push_history(OrderStatus::Cancelled, note, actor);
                Ok(OrderActionResult::Applied(self.clone()))
            }

            OrderAction::Advance {
                status: requested,
                note,
                actor,
            } => {
                if requested == OrderStatus::Cancelled || self.status.is_terminal() {
                    return Ok(OrderActionResult::Rejected(
                        OrderRejection::IllegalTransition {
                            current: self.status,
                            requested,
                        },
                    ));
                }

                let old_status = self.status;
                let now = Utc::now();
                // Stamp lifecycle timestamps the first time only; re-reaching
                // a status never overwrites the original stamp.
                if requested == OrderStatus::Shipped && self.shipped_at.is_none() {
                    self.shipped_at = Some(now);
                }
                if requested == OrderStatus::Delivered && self.delivered_at.is_none() {
                    self.delivered_at = Some(now);
                }
                self.status = requested;
                self.updated_at = now;
                let note = note.unwrap_or_else(|| {
                    format!("Status changed from {old_status} to {requested}")
                });
                self.push_history(requested, note, actor);
                Ok(OrderActionResult::Applied(self.clone()))
            }

            OrderAction::Refund { actor } => {
                if !self.can_refund() {
                    return Ok(OrderActionResult::Rejected(OrderRejection::NotRefundable {
                        payment_status: self.payment_status,
                        status: self.status,
                    }));
                }

                // Stock is deliberately not restored here; only cancel does that.
                self.payment_status = OrderPaymentStatus::Refunded;
                self.payment.status = PaymentStatus::Refunded;
                self.updated_at = Utc::now();
                self.push_history(self.status, "Payment refunded", actor);
                Ok(OrderActionResult::Applied(self.clone()))
            }

            OrderAction::MarkPaid { transaction_id } => {
                if self.payment_status != OrderPaymentStatus::Pending {
                    return Ok(OrderActionResult::Rejected(OrderRejection::AlreadyPaid));
                }

                let now = Utc::now();
                self.payment_status = OrderPaymentStatus::Paid;
                self.payment.status = PaymentStatus::Completed;
                self.payment.transaction_id = transaction_id;
                self.payment.completed_at = Some(now);
                self.paid_at = Some(now);
                self.updated_at = now;
                Ok(OrderActionResult::Applied(self.clone()))
            }
        }
    }
}
