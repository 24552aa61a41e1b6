//! # Cart Repository
//!
//! Storage for the line items of each cart. The cart actor loads the list, transforms it in
//! memory and saves it back on every operation, so the repository only needs whole-list
//! reads and writes. No ordering or transactional guarantees beyond last-write-wins are
//! expected from an implementation; serialization per cart comes from the actor.
//!
//! - [`InMemoryCartRepository`] - process-local map, the default
//! - [`JsonFileCartRepository`] - one JSON file per cart under a data directory

pub mod file;
pub mod memory;

pub use file::JsonFileCartRepository;
pub use memory::InMemoryCartRepository;

use crate::model::{CartId, OrderLineItem};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored cart is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract consumed by the cart actor.
///
/// Loading a cart that was never saved (or was cleared) yields an empty list.
#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    async fn load(&self, cart: CartId) -> Result<Vec<OrderLineItem>, RepositoryError>;

    async fn save(&self, cart: CartId, items: &[OrderLineItem]) -> Result<(), RepositoryError>;

    async fn clear(&self, cart: CartId) -> Result<(), RepositoryError>;
}
