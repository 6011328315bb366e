use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Shared CRUD surface for the typed actor clients.
///
/// Each concrete client (product, cart, order, address) wraps a
/// [`ResourceClient`] and translates transport failures into its own domain
/// error. The defaults here cover the operations whose shape never varies by
/// domain; anything with domain semantics (stock actions, owner scoping,
/// generated ids) lives on the concrete client.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The domain error this client surfaces.
    type Error: From<String> + Send + Sync;

    /// The wrapped transport-level client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Translates a transport failure into the domain error.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetches an entity by id; `None` when absent.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Applies an update payload and returns the updated entity.
    #[tracing::instrument(skip(self, update))]
    async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .update(id, update)
            .await
            .map_err(Self::map_error)
    }

    /// Removes an entity by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
