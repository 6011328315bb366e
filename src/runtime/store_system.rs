use tracing::{error, info};

use crate::checkout::CheckoutService;
use crate::clients::{AddressClient, CartClient, OrderClient, ProductClient};
use crate::{address_actor, cart_actor, order_actor, product_actor};

/// The main runtime orchestrator for the storefront.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Injecting the product client into the actors that
///   call back into inventory (cart validation, cancellation restock)
///
/// # Architecture
///
/// Four actors, one per aggregate:
/// - **Product Actor**: The catalog and the authoritative stock counters
/// - **Cart Actor**: One cart per user, validated against the catalog
/// - **Order Actor**: Placed orders and their state machine
/// - **Address Actor**: The shipping address book
///
/// On top of them sits [`CheckoutService`], which coordinates all four to turn
/// a cart into an order.
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new();
///
/// let product_id = system.product_client.create_product(product_data).await?;
/// system.cart_client.add_item("user_1", &product_id, 2).await?;
/// let order = system
///     .checkout
///     .checkout("user_1", &address_id, PaymentMethod::Stripe, None)
///     .await?;
///
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Client for interacting with the Address actor
    pub address_client: AddressClient,

    /// The checkout orchestrator, wired to all four clients
    pub checkout: CheckoutService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Creates and initializes a new `StoreSystem` with all actors running.
    ///
    /// The product actor starts first because the cart and order actors need
    /// its client as their injected context: the cart validates lines against
    /// live products, and the order actor releases stock on cancellation.
    pub fn new() -> Self {
        let (product_actor, product_client) = product_actor::new();
        let product_handle = tokio::spawn(product_actor.run(()));

        let (cart_actor, cart_client) = cart_actor::new();
        let cart_handle = tokio::spawn(cart_actor.run(product_client.clone()));

        let (order_actor, order_client) = order_actor::new();
        let order_handle = tokio::spawn(order_actor.run(product_client.clone()));

        let (address_actor, address_client) = address_actor::new();
        let address_handle = tokio::spawn(address_actor.run(()));

        let checkout = CheckoutService::new(
            cart_client.clone(),
            product_client.clone(),
            order_client.clone(),
            address_client.clone(),
        );

        Self {
            product_client,
            cart_client,
            order_client,
            address_client,
            checkout,
            handles: vec![product_handle, cart_handle, order_handle, address_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client (closing the actors' channels, which ends their
    /// event loops), then waits for the actor tasks to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // The checkout service holds clones of every client, so it must go
        // too or the channels stay open.
        drop(self.checkout);
        drop(self.product_client);
        drop(self.cart_client);
        drop(self.order_client);
        drop(self.address_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
