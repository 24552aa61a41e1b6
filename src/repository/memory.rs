use super::{CartRepository, RepositoryError};
use crate::model::{CartId, OrderLineItem};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

/// Keeps every cart's line items in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<CartId, Vec<OrderLineItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carts with stored items.
    pub async fn len(&self) -> usize {
        self.carts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.carts.read().await.is_empty()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self, cart: CartId) -> Result<Vec<OrderLineItem>, RepositoryError> {
        let items = self.carts.read().await.get(&cart).cloned().unwrap_or_default();
        trace!(%cart, count = items.len(), "load");
        Ok(items)
    }

    async fn save(&self, cart: CartId, items: &[OrderLineItem]) -> Result<(), RepositoryError> {
        trace!(%cart, count = items.len(), "save");
        self.carts.write().await.insert(cart, items.to_vec());
        Ok(())
    }

    async fn clear(&self, cart: CartId) -> Result<(), RepositoryError> {
        trace!(%cart, "clear");
        self.carts.write().await.remove(&cart);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItemId, MenuItemRef};
    use rust_decimal::Decimal;

    fn soup() -> OrderLineItem {
        OrderLineItem::new(
            MenuItemRef {
                id: MenuItemId(3),
                name: "Tomato soup".to_string(),
                price: Decimal::new(650, 2),
                description: String::new(),
                category: "starters".to_string(),
            },
            2,
        )
    }

    #[tokio::test]
    async fn unknown_cart_loads_empty() {
        let repo = InMemoryCartRepository::new();
        assert!(repo.load(CartId(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn carts_are_isolated_and_clearable() {
        let repo = InMemoryCartRepository::new();
        repo.save(CartId(1), &[soup()]).await.unwrap();
        repo.save(CartId(2), &[]).await.unwrap();

        assert_eq!(repo.load(CartId(1)).await.unwrap(), vec![soup()]);
        assert!(repo.load(CartId(2)).await.unwrap().is_empty());

        repo.clear(CartId(1)).await.unwrap();
        assert!(repo.load(CartId(1)).await.unwrap().is_empty());
        assert_eq!(repo.len().await, 1);
    }
}
