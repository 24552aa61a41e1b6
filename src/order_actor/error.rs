//! Error types for the Order actor.

use crate::framework::FrameworkError;
use crate::model::{OrderStatus, StaffRole};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order has no line items")]
    EmptyOrder,

    /// A line item carried a quantity below one.
    #[error("Invalid quantity for {item}: {quantity}")]
    InvalidQuantity { item: String, quantity: u32 },

    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// Line items are frozen once the kitchen has started.
    #[error("Order is {0}; line items can no longer change")]
    Locked(OrderStatus),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("{role:?} staff may not set status {status}")]
    Unauthorized { role: StaffRole, status: OrderStatus },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
