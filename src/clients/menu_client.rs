//! # Menu Client
//!
//! High-level API over the `MenuItem` actor.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::menu_actor::{MenuAction, MenuActionResult, MenuError};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, OrderLineItem};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(MenuError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(MenuError::from)
    }

    #[instrument(skip(self))]
    pub async fn set_available(&self, id: MenuItemId, available: bool) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, MenuAction::SetAvailability(available))
            .await
        {
            Ok(MenuActionResult::SetAvailability(item)) => Ok(item),
            Err(e) => Err(MenuError::from(e)),
        }
    }

    /// Available items, optionally limited to one category (case-insensitive), in id order.
    #[instrument(skip(self))]
    pub async fn browse(&self, category: Option<&str>) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.list().await?;
        Ok(items
            .into_iter()
            .filter(|item| item.available)
            .filter(|item| category.map_or(true, |c| item.in_category(c)))
            .collect())
    }

    /// Builds a cart line from the current menu entry.
    ///
    /// Fails with `NotFound` for unknown ids and `ValidationError` for sold-out dishes.
    pub async fn line_item(
        &self,
        id: MenuItemId,
        quantity: u32,
    ) -> Result<OrderLineItem, MenuError> {
        let item = self
            .get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))?;
        if !item.available {
            return Err(MenuError::ValidationError(format!(
                "{} is not available",
                item.name
            )));
        }
        Ok(OrderLineItem::from_menu_item(&item, quantity))
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MenuError::from(e)
    }
}
