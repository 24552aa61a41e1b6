//! # Order Actor
//!
//! The order book. Orders arrive from cart checkout or directly through
//! [`OrderClient::place_order`](crate::clients::OrderClient::place_order) and then move
//! through the kitchen lifecycle via [`OrderAction::UpdateStatus`].
//!
//! ## Structure
//!
//! - [`entity`] - validation, item locking and the status state machine
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`error`] - [`OrderError`]
//!
//! The order actor has no dependencies; it is started with `run(())`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
