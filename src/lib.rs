//! # Order Desk
//!
//! The domain core of a restaurant order-management back end, built from resource-oriented
//! actors on Tokio: a menu catalogue, carts composed line by line, an order book with a
//! kitchen status lifecycle, and statistics with CSV export.
//!
//! ## Core Concepts
//!
//! ### One actor per resource type
//! Every resource (menu item, cart, order) is owned by one `ResourceActor<T>` running in its
//! own task. Requests are processed one at a time, so the operations on a cart can never
//! interleave: two concurrent `add` calls on the same cart both land.
//!
//! ### Cart items live in a repository
//! A cart action loads the cart's line items from a [`CartRepository`](repository::CartRepository),
//! applies a pure transform (merge, set quantity, remove) and saves the result. The
//! repository is in memory by default or one JSON file per cart.
//!
//! ### Typed errors across the actor boundary
//! Each actor has its own `thiserror` enum ([`CartError`](cart_actor::CartError),
//! [`OrderError`](order_actor::OrderError), [`MenuError`](menu_actor::MenuError)). The framework
//! boxes it on the way out and the clients downcast it back, so callers match on the same
//! variant the entity returned.
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic actor, client, entity trait and mocks
//! - [`model`] - menu items, line items, carts and orders
//! - [`repository`] - cart storage backends
//! - [`menu_actor`], [`cart_actor`], [`order_actor`] - the `ActorEntity` implementations
//! - [`clients`] - [`MenuClient`](clients::MenuClient), [`CartClient`](clients::CartClient)
//!   with its per-cart [`OrderManager`](clients::OrderManager), and
//!   [`OrderClient`](clients::OrderClient)
//! - [`stats`] - order statistics, CSV sheets and the printable report
//! - [`config`] - [`SystemConfig`](config::SystemConfig), read from TOML
//! - [`lifecycle`] - [`OrderSystem`](lifecycle::OrderSystem) and tracing setup
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config order-desk.toml
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod repository;
pub mod stats;
