//! # Cart Client
//!
//! [`CartClient`] opens and closes carts; [`OrderManager`] is the handle bound to one cart
//! that composes its line items and checks it out.
//!
//! Every `OrderManager` call is a single action on the cart actor, so calls made through
//! different clones of the same manager are applied one after another.

use crate::cart_actor::{CartAction, CartActionResult, CartError, CheckoutDetails};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CartUpdate, MenuItemId, OrderId, OrderLineItem};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Opens a cart. Items already persisted for the new id are picked up.
    #[instrument(skip(self))]
    pub async fn open_cart(&self, params: CartCreate) -> Result<CartId, CartError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(CartError::from)?;
        info!(cart = %id, "Cart opened");
        Ok(id)
    }

    /// Closes a cart and drops its persisted items.
    #[instrument(skip(self))]
    pub async fn close_cart(&self, id: CartId) -> Result<(), CartError> {
        self.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn set_customer(&self, id: CartId, customer: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        let update = CartUpdate {
            customer: Some(customer),
        };
        self.inner.update(id, update).await.map_err(CartError::from)
    }

    /// Returns an [`OrderManager`] for one cart. Does not check that the cart is open; calls on
    /// a closed cart fail with `CartError::NotFound`.
    pub fn manager(&self, cart: CartId) -> OrderManager {
        OrderManager {
            cart,
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::from(e)
    }
}

/// Composes the line items of one cart.
///
/// Each operation returns the cart's items as they are after the change, or the tagged
/// [`CartError`] of the step that failed.
#[derive(Clone)]
pub struct OrderManager {
    cart: CartId,
    inner: ResourceClient<Cart>,
}

impl OrderManager {
    pub fn cart_id(&self) -> CartId {
        self.cart
    }

    async fn act(&self, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(self.cart, action)
            .await
            .map_err(CartError::from)
    }

    #[instrument(skip(self), fields(cart = %self.cart))]
    pub async fn load(&self) -> Result<Vec<OrderLineItem>, CartError> {
        match self.act(CartAction::Load).await? {
            CartActionResult::Load(items) => Ok(items),
            _ => unreachable!("Load action must return Load result"),
        }
    }

    /// Merges `item` into the cart: an entry with the same menu item id gains the new quantity
    /// and keeps its own price and instructions.
    #[instrument(skip(self, item), fields(cart = %self.cart, item = %item.menu_item_id(), quantity = item.quantity))]
    pub async fn add(&self, item: OrderLineItem) -> Result<Vec<OrderLineItem>, CartError> {
        match self.act(CartAction::Add(item)).await? {
            CartActionResult::Add(items) => Ok(items),
            _ => unreachable!("Add action must return Add result"),
        }
    }

    /// Sets the quantity of `item`. A quantity below one removes it; an absent id is a no-op.
    #[instrument(skip(self), fields(cart = %self.cart))]
    pub async fn update_quantity(
        &self,
        item: MenuItemId,
        quantity: i64,
    ) -> Result<Vec<OrderLineItem>, CartError> {
        match self
            .act(CartAction::UpdateQuantity { item, quantity })
            .await?
        {
            CartActionResult::UpdateQuantity(items) => Ok(items),
            _ => unreachable!("UpdateQuantity action must return UpdateQuantity result"),
        }
    }

    #[instrument(skip(self, instructions), fields(cart = %self.cart))]
    pub async fn update_instructions(
        &self,
        item: MenuItemId,
        instructions: impl Into<String>,
    ) -> Result<Vec<OrderLineItem>, CartError> {
        let action = CartAction::UpdateInstructions {
            item,
            instructions: instructions.into(),
        };
        match self.act(action).await? {
            CartActionResult::UpdateInstructions(items) => Ok(items),
            _ => unreachable!("UpdateInstructions action must return UpdateInstructions result"),
        }
    }

    #[instrument(skip(self), fields(cart = %self.cart))]
    pub async fn remove(&self, item: MenuItemId) -> Result<Vec<OrderLineItem>, CartError> {
        match self.act(CartAction::Remove(item)).await? {
            CartActionResult::Remove(items) => Ok(items),
            _ => unreachable!("Remove action must return Remove result"),
        }
    }

    #[instrument(skip(self), fields(cart = %self.cart))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match self.act(CartAction::Clear).await? {
            CartActionResult::Clear(()) => Ok(()),
            _ => unreachable!("Clear action must return Clear result"),
        }
    }

    #[instrument(skip(self), fields(cart = %self.cart))]
    pub async fn calculate_total(&self) -> Result<Decimal, CartError> {
        match self.act(CartAction::CalculateTotal).await? {
            CartActionResult::CalculateTotal(total) => Ok(total),
            _ => unreachable!("CalculateTotal action must return CalculateTotal result"),
        }
    }

    /// Places an order with the cart's items and empties the cart.
    #[instrument(skip(self, details), fields(cart = %self.cart, customer = %details.customer))]
    pub async fn checkout(&self, details: CheckoutDetails) -> Result<OrderId, CartError> {
        match self.act(CartAction::Checkout(details)).await? {
            CartActionResult::Checkout(order_id) => Ok(order_id),
            _ => unreachable!("Checkout action must return Checkout result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::MenuItemRef;

    fn fries(quantity: u32) -> OrderLineItem {
        OrderLineItem::new(
            MenuItemRef {
                id: MenuItemId(4),
                name: "Fries".to_string(),
                price: Decimal::new(350, 2),
                description: String::new(),
                category: "sides".to_string(),
            },
            quantity,
        )
    }

    #[tokio::test]
    async fn add_sends_the_item_to_its_cart() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let manager = CartClient::new(client).manager(CartId(2));

        let task = tokio::spawn(async move { manager.add(fries(2)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(2));
        match action {
            CartAction::Add(item) => assert_eq!(item.quantity, 2),
            other => panic!("Expected Add action, got {:?}", other),
        }
        responder
            .send(Ok(CartActionResult::Add(vec![fries(2)])))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), vec![fries(2)]);
    }

    #[tokio::test]
    async fn storage_failure_keeps_its_tag() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(CartId(1))
            .return_err(FrameworkError::EntityError(Box::new(CartError::RemoveFailed(
                "disk full".to_string(),
            ))));
        let manager = CartClient::new(mock.client()).manager(CartId(1));

        let err = manager.remove(MenuItemId(4)).await.unwrap_err();
        assert_eq!(err, CartError::RemoveFailed("disk full".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_cart_is_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(CartId(5))
            .return_err(FrameworkError::NotFound("cart_5".to_string()));
        let manager = CartClient::new(mock.client()).manager(CartId(5));

        assert_eq!(
            manager.calculate_total().await.unwrap_err(),
            CartError::NotFound("cart_5".to_string())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn close_cart_deletes_it() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_delete(CartId(3)).return_ok();
        let carts = CartClient::new(mock.client());

        carts.close_cart(CartId(3)).await.unwrap();
        mock.verify();
    }
}
