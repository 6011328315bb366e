//! # Cart Client
//!
//! High-level API for the Cart actor. Carts are keyed by the owning user id
//! and created lazily on first mutation, so callers never issue an explicit
//! "create cart" call.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::cart_actor::{
    BulkItemError, CartAction, CartActionResult, CartError, CartLineInput,
};
use crate::clients::actor_client::ActorClient;
use crate::clients::product_client::ProductClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartView, CartViewLine};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Creates the user's cart if it does not exist yet.
    ///
    /// A concurrent first mutation can win the race; the resulting
    /// `Duplicate` is the success case here, not a failure.
    async fn ensure_cart(&self, user_id: &str) -> Result<(), CartError> {
        if self
            .inner
            .get(user_id.to_string())
            .await
            .map_err(Self::map_error)?
            .is_some()
        {
            return Ok(());
        }
        match self.inner.create(user_id.to_string(), CartCreate).await {
            Ok(_) | Err(FrameworkError::Duplicate(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn mutate(&self, user_id: &str, action: CartAction) -> Result<Cart, CartError> {
        match self.inner.perform_action(user_id.to_string(), action).await {
            Ok(CartActionResult::Updated(cart)) => Ok(cart),
            Ok(CartActionResult::Rejected(rejection)) => Err(rejection.into()),
            Ok(other) => Err(CartError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
            Err(FrameworkError::NotFound(_)) => Err(CartError::NotFound(user_id.to_string())),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Adds `quantity` units of a product, merging with any existing line.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.ensure_cart(user_id).await?;
        self.mutate(
            user_id,
            CartAction::AddItem {
                product_id: product_id.to_string(),
                quantity,
            },
        )
        .await
    }

    /// Replaces the quantity of an existing line.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.mutate(
            user_id,
            CartAction::SetQuantity {
                product_id: product_id.to_string(),
                quantity,
            },
        )
        .await
    }

    /// Removes a line entirely.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: &str, product_id: &str) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.mutate(
            user_id,
            CartAction::RemoveItem {
                product_id: product_id.to_string(),
            },
        )
        .await
    }

    /// Deletes all lines. The cart itself persists.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: &str) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.mutate(user_id, CartAction::Clear).await
    }

    /// Bulk upsert: each entry replaces (or creates) that product's line.
    /// Valid entries apply even when others are rejected.
    #[instrument(skip(self, items))]
    pub async fn set_items(
        &self,
        user_id: &str,
        items: Vec<CartLineInput>,
    ) -> Result<(Cart, Vec<BulkItemError>), CartError> {
        debug!(count = items.len(), "Sending request");
        self.ensure_cart(user_id).await?;
        match self
            .inner
            .perform_action(user_id.to_string(), CartAction::SetItems(items))
            .await
        {
            Ok(CartActionResult::Bulk { cart, errors }) => Ok((cart, errors)),
            Ok(other) => Err(CartError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
            Err(FrameworkError::NotFound(_)) => Err(CartError::NotFound(user_id.to_string())),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Renders the cart with live product names, prices, and derived totals.
    ///
    /// A user with no cart yet sees an empty view, not an error. Lines whose
    /// product has since been deleted are omitted from the view.
    #[instrument(skip(self, products))]
    pub async fn view(&self, user_id: &str, products: &ProductClient) -> Result<CartView, CartError> {
        debug!("Sending request");
        let cart = match self.inner.get(user_id.to_string()).await {
            Ok(Some(cart)) => cart,
            Ok(None) => return Ok(CartView::empty(user_id)),
            Err(e) => return Err(Self::map_error(e)),
        };

        let mut view = CartView::empty(user_id);
        for line in &cart.lines {
            let product = match products.get(line.product_id.clone()).await {
                Ok(Some(product)) => product,
                Ok(None) => continue,
                Err(e) => return Err(CartError::ActorCommunicationError(e.to_string())),
            };
            let line_total = (product.price * rust_decimal::Decimal::from(line.quantity)).round_dp(2);
            view.total_items += line.quantity;
            view.subtotal += line_total;
            view.lines.push(CartViewLine {
                product_id: line.product_id.clone(),
                product_name: product.name,
                unit_price: product.price,
                quantity: line.quantity,
                line_total,
            });
        }
        view.subtotal = view.subtotal.round_dp(2);
        Ok(view)
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(user_id) => CartError::NotFound(user_id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
