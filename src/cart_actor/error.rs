//! Error types for the Cart actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors returned by cart operations.
///
/// Every storage failure is tagged with the operation that hit it, so callers can tell a
/// failed `add` from a failed `load` without parsing messages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Load failed: {0}")]
    LoadFailed(String),

    #[error("Add failed: {0}")]
    AddFailed(String),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    #[error("Clear failed: {0}")]
    ClearFailed(String),

    #[error("Calculation failed: {0}")]
    CalculationFailed(String),

    /// Line items must have a quantity of at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Cart is empty")]
    EmptyCart,

    /// The order actor refused the cart's contents.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<CartError>() {
            Ok(cart_error) => cart_error,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
