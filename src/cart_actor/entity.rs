//! Entity trait implementation for the Cart domain type.
//!
//! The cart actor's context is a [`ProductClient`]: line validation needs the
//! live catalog (product exists, is active, has enough stock). The stock
//! check here is advisory — the authoritative check-and-decrement happens at
//! reservation time during checkout.

use async_trait::async_trait;
use chrono::Utc;

use super::actions::{BulkItemError, CartAction, CartActionResult, CartLineInput, CartRejection};
use crate::clients::{ActorClient, ProductClient};
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartLine, Product};

/// Fetches and vets a product for a desired line quantity.
///
/// Returns `Ok(Ok(product))` when the line is acceptable, `Ok(Err(rejection))`
/// for a business refusal, and `Err` only for transport failures.
async fn vet_line(
    ctx: &ProductClient,
    product_id: &str,
    quantity: u32,
) -> Result<Result<Product, CartRejection>, String> {
    if quantity == 0 {
        return Ok(Err(CartRejection::InvalidQuantity(quantity)));
    }
    let product = ctx
        .get(product_id.to_string())
        .await
        .map_err(|e| e.to_string())?;
    let Some(product) = product else {
        return Ok(Err(CartRejection::ProductNotFound(product_id.to_string())));
    };
    if !product.is_active {
        return Ok(Err(CartRejection::InactiveProduct(product_id.to_string())));
    }
    if product.stock < quantity {
        return Ok(Err(CartRejection::InsufficientStock {
            product_id: product_id.to_string(),
            available: product.stock,
        }));
    }
    Ok(Ok(product))
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = String;
    type CreateParams = CartCreate;
    type UpdateParams = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Filter = ();
    type Context = ProductClient;

    /// Creates an empty cart keyed by the owning user id.
    fn from_create_params(id: String, _params: CartCreate) -> Result<Self, String> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &Self::Context,
    ) -> Result<CartActionResult, String> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    return Ok(CartActionResult::Rejected(CartRejection::InvalidQuantity(
                        quantity,
                    )));
                }
                let existing = self.line(&product_id).map_or(0, |line| line.quantity);
                let Some(merged) = existing.checked_add(quantity) else {
                    return Ok(CartActionResult::Rejected(CartRejection::InvalidQuantity(
                        quantity,
                    )));
                };
                match vet_line(ctx, &product_id, merged).await? {
                    Err(rejection) => Ok(CartActionResult::Rejected(rejection)),
                    Ok(_) => {
                        if let Some(line) = self
                            .lines
                            .iter_mut()
                            .find(|line| line.product_id == product_id)
                        {
                            line.quantity = merged;
                        } else {
                            self.lines.push(CartLine {
                                product_id,
                                quantity,
                            });
                        }
                        self.updated_at = Utc::now();
                        Ok(CartActionResult::Updated(self.clone()))
                    }
                }
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if self.line(&product_id).is_none() {
                    return Ok(CartActionResult::Rejected(CartRejection::LineNotFound(
                        product_id,
                    )));
                }
                match vet_line(ctx, &product_id, quantity).await? {
                    Err(rejection) => Ok(CartActionResult::Rejected(rejection)),
                    Ok(_) => {
                        if let Some(line) = self
                            .lines
                            .iter_mut()
                            .find(|line| line.product_id == product_id)
                        {
                            line.quantity = quantity;
                        }
                        self.updated_at = Utc::now();
                        Ok(CartActionResult::Updated(self.clone()))
                    }
                }
            }
            CartAction::RemoveItem { product_id } => {
                let before = self.lines.len();
                self.lines.retain(|line| line.product_id != product_id);
                if self.lines.len() == before {
                    return Ok(CartActionResult::Rejected(CartRejection::LineNotFound(
                        product_id,
                    )));
                }
                self.updated_at = Utc::now();
                Ok(CartActionResult::Updated(self.clone()))
            }
            CartAction::Clear => {
                self.lines.clear();
                self.updated_at = Utc::now();
                Ok(CartActionResult::Updated(self.clone()))
            }
            CartAction::SetItems(items) => {
                let mut errors = Vec::new();
                let mut applied = false;
                for CartLineInput {
                    product_id,
                    quantity,
                } in items
                {
                    match vet_line(ctx, &product_id, quantity).await? {
                        Err(rejection) => errors.push(BulkItemError {
                            product_id,
                            rejection,
                        }),
                        Ok(_) => {
                            if let Some(line) = self
                                .lines
                                .iter_mut()
                                .find(|line| line.product_id == product_id)
                            {
                                line.quantity = quantity;
                            } else {
                                self.lines.push(CartLine {
                                    product_id,
                                    quantity,
                                });
                            }
                            applied = true;
                        }
                    }
                }
                // An all-rejected bulk leaves the cart untouched.
                if applied {
                    self.updated_at = Utc::now();
                }
                Ok(CartActionResult::Bulk {
                    cart: self.clone(),
                    errors,
                })
            }
        }
    }
}
