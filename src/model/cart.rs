/// A customer's pending cart.
///
/// The cart entity itself only carries identity and bookkeeping. Its line items live in a
/// [`CartRepository`](crate::repository::CartRepository) and are loaded, transformed and saved
/// on every cart action.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub customer: Option<String>,
    /// Cart whose items were moved into this one when it was opened.
    pub restored_from: Option<CartId>,
    pub opened_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(id: CartId, customer: Option<String>) -> Self {
        Self {
            id,
            customer,
            restored_from: None,
            opened_at: Utc::now(),
        }
    }
}

/// Payload for opening a cart.
///
/// A new cart starts empty. Items persisted under a previous cart are carried over only when
/// that cart is named in `restore_from`.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub customer: Option<String>,
    pub restore_from: Option<CartId>,
}

/// Attaches a customer to an anonymous cart. Line item changes go through
/// [`CartAction`](crate::cart_actor::CartAction).
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub customer: Option<String>,
}
