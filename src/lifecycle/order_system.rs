use crate::cart_actor::{self, CartContext};
use crate::clients::{CartClient, MenuClient, OrderClient};
use crate::config::{StorageBackend, SystemConfig};
use crate::menu_actor;
use crate::order_actor::{self, OrderError};
use crate::repository::{CartRepository, InMemoryCartRepository, JsonFileCartRepository};
use crate::stats::OrderStats;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator: starts the menu, order and cart actors and wires them together.
///
/// # Architecture
///
/// - **Menu Actor**: the catalogue (`Context = ()`)
/// - **Order Actor**: the order book and status lifecycle (`Context = ()`)
/// - **Cart Actor**: open carts; its context holds the [`CartRepository`] and an
///   [`OrderClient`] used by checkout
///
/// # Example
///
/// ```rust
/// use order_desk::lifecycle::OrderSystem;
/// use order_desk::model::CartCreate;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::new();
///     let cart = system.cart_client.open_cart(CartCreate::default()).await?;
///     assert!(system.cart_client.manager(cart).load().await?.is_empty());
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    config: SystemConfig,
    /// Awaited in order on shutdown: carts first, since the cart actor holds an order client.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Default configuration with in-memory cart storage.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_repository(
            SystemConfig::default(),
            Arc::new(InMemoryCartRepository::new()),
        )
    }

    /// Builds the repository named by `config.storage`.
    pub fn from_config(config: SystemConfig) -> Self {
        let repository: Arc<dyn CartRepository> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemoryCartRepository::new()),
            StorageBackend::File => {
                Arc::new(JsonFileCartRepository::new(config.storage.data_dir.clone()))
            }
        };
        Self::with_repository(config, repository)
    }

    pub fn with_repository(config: SystemConfig, repository: Arc<dyn CartRepository>) -> Self {
        let buffer = config.channel_buffer_size;

        // 1. Create actors (no dependencies)
        let (menu_actor, menu_generic) = menu_actor::new(buffer);
        let (order_actor, order_generic) = order_actor::new(buffer);
        let (cart_actor, cart_generic) = cart_actor::new(buffer);

        let menu_client = MenuClient::new(menu_generic);
        let order_client = OrderClient::new(order_generic);
        let cart_client = CartClient::new(cart_generic);

        // 2. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));
        let cart_handle = tokio::spawn(
            cart_actor.run(CartContext::new(repository, order_client.clone())),
        );

        info!(backend = ?config.storage.backend, buffer, "Order system started");

        Self {
            menu_client,
            order_client,
            cart_client,
            config,
            handles: vec![cart_handle, order_handle, menu_handle],
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Statistics over the whole order book as of now.
    pub async fn stats(&self) -> Result<OrderStats, OrderError> {
        self.order_client
            .stats(Utc::now(), self.config.best_sellers_limit)
            .await
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the actors' channels; each actor drains and exits. Any
    /// [`OrderManager`](crate::clients::OrderManager) or client clone still alive elsewhere
    /// keeps its actor running, so drop those first.
    ///
    /// Returns `Err` if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.order_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ActorClient;

    #[tokio::test]
    async fn file_backend_writes_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SystemConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = dir.path().to_path_buf();

        let system = OrderSystem::from_config(config);
        let menu = system
            .menu_client
            .create_menu_item(crate::model::MenuItemCreate {
                name: "Tea".to_string(),
                price: rust_decimal::Decimal::new(250, 2),
                description: String::new(),
                category: "drinks".to_string(),
            })
            .await
            .unwrap();
        let line = system.menu_client.line_item(menu, 1).await.unwrap();
        let cart = system
            .cart_client
            .open_cart(crate::model::CartCreate::default())
            .await
            .unwrap();
        system.cart_client.manager(cart).add(line).await.unwrap();

        assert!(dir.path().join("cart_1.json").exists());
        assert_eq!(system.cart_client.list().await.unwrap().len(), 1);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_waits_for_every_actor() {
        let system = OrderSystem::new();
        assert_eq!(system.config().channel_buffer_size, 32);
        assert!(system.shutdown().await.is_ok());
    }
}
