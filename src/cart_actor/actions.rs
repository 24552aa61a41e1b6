//! Custom actions for the Cart actor.
//!
//! Each action is one load → transform → save cycle against the cart's repository, executed
//! inside the actor's message loop. See
//! [`impl ActorEntity for Cart`](crate::model::Cart#impl-ActorEntity-for-Cart).

use crate::model::{MenuItemId, OrderId, OrderLineItem, OrderType};
use rust_decimal::Decimal;

/// Order details supplied at checkout; the items come from the cart.
///
/// A blank `customer` falls back to the customer the cart was opened for.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub customer: String,
    pub order_type: OrderType,
    pub table_number: Option<u32>,
}

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Returns the current items.
    Load,
    /// Merges an item into the cart by menu item id.
    Add(OrderLineItem),
    /// Sets an item's quantity; below one removes it.
    UpdateQuantity { item: MenuItemId, quantity: i64 },
    /// Replaces an item's special instructions.
    UpdateInstructions { item: MenuItemId, instructions: String },
    /// Removes an item. Absent items are ignored.
    Remove(MenuItemId),
    /// Empties the cart.
    Clear,
    /// Σ(unit price × quantity).
    CalculateTotal,
    /// Places an order with the cart's items and empties the cart.
    Checkout(CheckoutDetails),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    Load(Vec<OrderLineItem>),
    Add(Vec<OrderLineItem>),
    UpdateQuantity(Vec<OrderLineItem>),
    UpdateInstructions(Vec<OrderLineItem>),
    Remove(Vec<OrderLineItem>),
    Clear(()),
    CalculateTotal(Decimal),
    Checkout(OrderId),
}
