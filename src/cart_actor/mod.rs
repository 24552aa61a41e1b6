//! # Cart Actor
//!
//! Owns every open cart and serializes the operations on them. The cart's line items live in
//! a [`CartRepository`]; the actor only remembers which carts are open.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`error`] - [`CartError`]
//! - [`new()`] - factory returning the actor and its generic client
//!
//! ## Context
//!
//! The actor is started with a [`CartContext`]: the repository holding the items, and an
//! [`OrderClient`] used by checkout to place the order.
//!
//! ## Usage
//!
//! ```rust
//! use order_desk::cart_actor::{self, CartContext};
//! use order_desk::clients::{CartClient, OrderClient};
//! use order_desk::model::{CartCreate, MenuItemId, MenuItemRef, OrderLineItem};
//! use order_desk::order_actor;
//! use order_desk::repository::InMemoryCartRepository;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (order_actor, order_generic) = order_actor::new(32);
//!     let orders = OrderClient::new(order_generic);
//!     tokio::spawn(order_actor.run(()));
//!
//!     let (cart_actor, cart_generic) = cart_actor::new(32);
//!     let carts = CartClient::new(cart_generic);
//!     tokio::spawn(cart_actor.run(CartContext::new(Arc::new(InMemoryCartRepository::new()), orders)));
//!
//!     let cart = carts.open_cart(CartCreate::default()).await?;
//!     let manager = carts.manager(cart);
//!     let fries = MenuItemRef {
//!         id: MenuItemId(1),
//!         name: "Fries".into(),
//!         price: Decimal::new(350, 2),
//!         description: String::new(),
//!         category: "sides".into(),
//!     };
//!     manager.add(OrderLineItem::new(fries, 2)).await?;
//!     assert_eq!(manager.calculate_total().await?, Decimal::new(700, 2));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Cart;
use crate::repository::CartRepository;
use std::sync::Arc;

/// Dependencies injected into the cart actor at `run()`.
#[derive(Clone)]
pub struct CartContext {
    pub repository: Arc<dyn CartRepository>,
    pub orders: OrderClient,
}

impl CartContext {
    pub fn new(repository: Arc<dyn CartRepository>, orders: OrderClient) -> Self {
        Self { repository, orders }
    }
}

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
