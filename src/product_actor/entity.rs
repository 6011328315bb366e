//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`Product`] to be managed by the generic
//! [`ResourceActor`](crate::framework::ResourceActor), including the stock
//! reserve/release actions.

use async_trait::async_trait;

use super::actions::{ProductAction, ProductActionResult};
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductUpdate};

#[async_trait]
impl ActorEntity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Filter = ();
    type Context = ();

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        let mut product = Self::new(id, params.name, params.sku, params.price, params.stock);
        product.description = params.description;
        Ok(product)
    }

    /// Handles updates to the Product entity (catalog maintenance; stock
    /// edits here are manual restocks, not reservations).
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &Self::Context) -> Result<(), String> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    /// Handles stock actions. The actor loop serializes these, so the
    /// check-and-decrement in `Reserve` is atomic with respect to every other
    /// mutation of this product's stock.
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::Stock(self.stock)),
            ProductAction::Reserve(quantity) => {
                if quantity == 0 {
                    return Err("cannot reserve zero units".to_string());
                }
                if self.stock >= quantity {
                    self.stock -= quantity;
                    Ok(ProductActionResult::Reserved)
                } else {
                    Ok(ProductActionResult::Insufficient {
                        available: self.stock,
                    })
                }
            }
            ProductAction::Release(quantity) => {
                self.stock = self.stock.saturating_add(quantity);
                Ok(ProductActionResult::Released)
            }
        }
    }
}
