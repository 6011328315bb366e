//! # Storefront
//!
//! > **An actor-based e-commerce checkout core.**
//!
//! This crate implements the checkout-to-fulfillment workflow of an e-commerce
//! backend: mutable per-user carts, products with reservable stock, immutable
//! order records with an append-only status history, and an all-or-nothing
//! checkout orchestrator that ties them together.
//!
//! ## Design Philosophy
//!
//! Every shared mutable resource (a product's stock counter, a user's cart, an
//! order's status) is owned by exactly one actor task. Actors process their
//! messages sequentially, so a stock reservation is a single indivisible
//! check-and-decrement with no locks, and order transitions are naturally
//! serialized per order. Multiple actors still run in parallel, so independent
//! checkouts never contend with each other.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` message loop and its `ResourceClient<T>`.
//! It knows nothing about commerce; it provides CRUD, custom actions, and
//! filtered listing for any [`ActorEntity`](framework::ActorEntity).
//!
//! ### 2. The Domain ([`model`], [`pricing`])
//! Pure data: products, carts, addresses, orders with their line-item and
//! shipping snapshots, and the pure pricing derivation (subtotal, tax,
//! shipping, total).
//!
//! ### 3. The Actors ([`product_actor`], [`cart_actor`], [`order_actor`], [`address_actor`])
//! Concrete [`ActorEntity`](framework::ActorEntity) implementations: the
//! inventory ledger (reserve/release), the cart aggregate, the order state
//! machine, and the address book.
//!
//! ### 4. The Interface ([`clients`], [`checkout`])
//! Type-safe clients wrapping the generic message passing, plus the
//! [`CheckoutService`](checkout::CheckoutService) orchestrator that converts a
//! cart into an order atomically.
//!
//! ### 5. The Orchestrator ([`runtime`])
//! [`StoreSystem`](runtime::StoreSystem) spins up all actors, wires their
//! dependencies, and shuts them down gracefully.
//!
//! ## Quick Start
//!
//! ```ignore
//! let system = StoreSystem::new();
//! let product_id = system.product_client.create_product(params).await?;
//! system.cart_client.add_item(&user, &product_id, 2).await?;
//! let order = system
//!     .checkout
//!     .checkout(&user, &address_id, PaymentMethod::Stripe, None)
//!     .await?;
//! system.shutdown().await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod address_actor;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod framework;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod runtime;
