//! # Menu Actor
//!
//! The menu catalogue: dishes and drinks with a price, a category and an availability flag.
//! Carts take a [`MenuItemRef`](crate::model::MenuItemRef) snapshot of an item, so later price
//! changes here do not affect items already in a cart or an order.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::MenuItem;

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}
