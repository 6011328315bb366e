//! # Address Client
//!
//! High-level API for the Address actor (the shipping address book).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::address_actor::AddressError;
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Address, AddressCreate, AddressUpdate};

/// Client for interacting with the Address actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
    id_counter: Arc<AtomicU64>,
}

impl AddressClient {
    pub fn new(inner: ResourceClient<Address>) -> Self {
        Self {
            inner,
            id_counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates an address with a generated `address_N` id.
    #[instrument(skip(self, params))]
    pub async fn create_address(&self, params: AddressCreate) -> Result<String, AddressError> {
        debug!("create_address called");
        let id = format!("address_{}", self.id_counter.fetch_add(1, Ordering::SeqCst));
        self.inner.create(id, params).await.map_err(Self::map_error)
    }

    pub async fn update_address(
        &self,
        id: String,
        update: AddressUpdate,
    ) -> Result<Address, AddressError> {
        self.update(id, update).await
    }

    /// Fetches an address only if it belongs to `user_id` and is active.
    ///
    /// Anything else answers `None` so callers cannot distinguish a foreign
    /// address from a missing one.
    #[instrument(skip(self))]
    pub async fn get_active(
        &self,
        address_id: &str,
        user_id: &str,
    ) -> Result<Option<Address>, AddressError> {
        debug!("Sending request");
        let address = self
            .inner
            .get(address_id.to_string())
            .await
            .map_err(Self::map_error)?;
        Ok(address.filter(|a| a.user_id == user_id && a.is_active))
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    type Error = AddressError;

    fn inner(&self) -> &ResourceClient<Address> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => AddressError::NotFound(id),
            FrameworkError::Custom(msg) => AddressError::ValidationError(msg),
            other => AddressError::ActorCommunicationError(other.to_string()),
        }
    }
}
