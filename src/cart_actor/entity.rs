//! ActorEntity trait implementation for the Cart domain type.
//!
//! Cart actions never keep line items in actor memory: each one loads the list from the
//! repository, applies a pure transform from [`crate::model::line_item`], and saves the result.
//! Because the actor processes one request at a time, two concurrent `add` calls on the same
//! cart cannot overwrite each other's save.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use super::CartContext;
use crate::framework::ActorEntity;
use crate::model::line_item::{
    line_items_total, merge_line_item, remove_line_item, set_instructions, set_quantity,
};
use crate::model::{Cart, CartCreate, CartId, CartUpdate, OrderCreate, OrderLineItem};
use crate::repository::CartRepository;
use async_trait::async_trait;
use tracing::{debug, info, warn};

impl Cart {
    /// Load, transform, save. Storage failures on either side are tagged with `tag`.
    async fn modify<F>(
        &self,
        repository: &dyn CartRepository,
        tag: fn(String) -> CartError,
        transform: F,
    ) -> Result<Vec<OrderLineItem>, CartError>
    where
        F: FnOnce(&mut Vec<OrderLineItem>) + Send,
    {
        let mut items = repository
            .load(self.id)
            .await
            .map_err(|e| tag(e.to_string()))?;
        transform(&mut items);
        repository
            .save(self.id, &items)
            .await
            .map_err(|e| tag(e.to_string()))?;
        debug!(cart = %self.id, count = items.len(), "saved");
        Ok(items)
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = CartUpdate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        let mut cart = Self::new(id, params.customer);
        cart.restored_from = params.restore_from;
        Ok(cart)
    }

    /// Cart ids restart at 1 with every actor, so items found under a fresh id belong to a
    /// cart from an earlier run and are dropped. Items are carried over only from the cart
    /// named in `restore_from`.
    async fn on_create(&mut self, ctx: &CartContext) -> Result<(), Self::Error> {
        let repository = ctx.repository.as_ref();
        match self.restored_from {
            Some(source) if source == self.id => {
                let items = repository
                    .load(self.id)
                    .await
                    .map_err(|e| CartError::LoadFailed(e.to_string()))?;
                info!(cart = %self.id, count = items.len(), "Resumed persisted items");
            }
            Some(source) => {
                let items = repository
                    .load(source)
                    .await
                    .map_err(|e| CartError::LoadFailed(e.to_string()))?;
                repository
                    .save(self.id, &items)
                    .await
                    .map_err(|e| CartError::UpdateFailed(e.to_string()))?;
                repository
                    .clear(source)
                    .await
                    .map_err(|e| CartError::ClearFailed(e.to_string()))?;
                info!(cart = %self.id, from = %source, count = items.len(), "Restored persisted items");
            }
            None => {
                let stale = repository
                    .load(self.id)
                    .await
                    .map_err(|e| CartError::LoadFailed(e.to_string()))?;
                if !stale.is_empty() {
                    warn!(cart = %self.id, count = stale.len(), "Dropping items left from an earlier cart");
                    repository
                        .clear(self.id)
                        .await
                        .map_err(|e| CartError::ClearFailed(e.to_string()))?;
                }
            }
        }
        Ok(())
    }

    async fn on_update(&mut self, update: CartUpdate, _ctx: &CartContext) -> Result<(), Self::Error> {
        if let Some(customer) = update.customer {
            self.customer = Some(customer);
        }
        Ok(())
    }

    /// Closing a cart drops its persisted items.
    async fn on_delete(&self, ctx: &CartContext) -> Result<(), Self::Error> {
        ctx.repository
            .clear(self.id)
            .await
            .map_err(|e| CartError::ClearFailed(e.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, Self::Error> {
        let repository = ctx.repository.as_ref();
        match action {
            CartAction::Load => {
                let items = repository
                    .load(self.id)
                    .await
                    .map_err(|e| CartError::LoadFailed(e.to_string()))?;
                Ok(CartActionResult::Load(items))
            }
            CartAction::Add(item) => {
                if item.quantity == 0 {
                    return Err(CartError::InvalidQuantity(item.quantity));
                }
                let items = self
                    .modify(repository, CartError::AddFailed, |items| {
                        merge_line_item(items, item)
                    })
                    .await?;
                Ok(CartActionResult::Add(items))
            }
            CartAction::UpdateQuantity { item, quantity } => {
                let items = self
                    .modify(repository, CartError::UpdateFailed, |items| {
                        set_quantity(items, item, quantity)
                    })
                    .await?;
                Ok(CartActionResult::UpdateQuantity(items))
            }
            CartAction::UpdateInstructions { item, instructions } => {
                let items = self
                    .modify(repository, CartError::UpdateFailed, |items| {
                        set_instructions(items, item, &instructions)
                    })
                    .await?;
                Ok(CartActionResult::UpdateInstructions(items))
            }
            CartAction::Remove(item) => {
                let items = self
                    .modify(repository, CartError::RemoveFailed, |items| {
                        remove_line_item(items, item)
                    })
                    .await?;
                Ok(CartActionResult::Remove(items))
            }
            CartAction::Clear => {
                repository
                    .clear(self.id)
                    .await
                    .map_err(|e| CartError::ClearFailed(e.to_string()))?;
                Ok(CartActionResult::Clear(()))
            }
            CartAction::CalculateTotal => {
                let items = repository
                    .load(self.id)
                    .await
                    .map_err(|e| CartError::CalculationFailed(e.to_string()))?;
                Ok(CartActionResult::CalculateTotal(line_items_total(&items)))
            }
            CartAction::Checkout(details) => {
                let items = repository
                    .load(self.id)
                    .await
                    .map_err(|e| CartError::LoadFailed(e.to_string()))?;
                if items.is_empty() {
                    return Err(CartError::EmptyCart);
                }
                let customer = if details.customer.trim().is_empty() {
                    self.customer.clone().unwrap_or_default()
                } else {
                    details.customer
                };

                let order_id = ctx
                    .orders
                    .place_order(OrderCreate {
                        customer,
                        order_type: details.order_type,
                        table_number: details.table_number,
                        items,
                    })
                    .await
                    .map_err(|e| CartError::CheckoutFailed(e.to_string()))?;

                // Checkout is committed once the order is placed.
                if let Err(e) = repository.clear(self.id).await {
                    warn!(cart = %self.id, %order_id, error = %e, "Cart not cleared after checkout");
                }
                info!(cart = %self.id, %order_id, "Checked out");
                Ok(CartActionResult::Checkout(order_id))
            }
        }
    }
}
