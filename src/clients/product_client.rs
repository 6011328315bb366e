//! # Product Client
//!
//! High-level API for the Product actor: catalog CRUD plus the inventory
//! ledger contract (`check_stock`, `reserve_stock`, `release_stock`).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    id_counter: Arc<AtomicU64>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self {
            inner,
            id_counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a product with a generated `product_N` id.
    #[instrument(skip(self, params))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!(?params, "create_product called");
        let id = format!("product_{}", self.id_counter.fetch_add(1, Ordering::SeqCst));
        self.inner
            .create(id, params)
            .await
            .map_err(Self::map_error)
    }

    /// Catalog maintenance: price, description, manual restock, activation.
    pub async fn update_product(
        &self,
        id: String,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        self.update(id, update).await
    }

    /// Reads the current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::Stock(stock)) => Ok(stock),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Atomically reserves `quantity` units: checks and decrements in one
    /// indivisible step inside the product actor.
    ///
    /// # Errors
    /// [`ProductError::InsufficientStock`] carries the actually-available
    /// quantity so callers can offer a reduced amount.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<(), ProductError> {
        debug!("Sending request");
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }
        match self
            .inner
            .perform_action(id, ProductAction::Reserve(quantity))
            .await
        {
            Ok(ProductActionResult::Reserved) => Ok(()),
            Ok(ProductActionResult::Insufficient { available }) => {
                Err(ProductError::InsufficientStock {
                    requested: quantity,
                    available,
                })
            }
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Returns `quantity` units to stock (cancellation or rollback).
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<(), ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::Release(quantity))
            .await
        {
            Ok(ProductActionResult::Released) => Ok(()),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
