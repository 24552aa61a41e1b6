//! Line items and the merge rules shared by carts and orders.
//!
//! A collection of line items never holds two entries for the same menu item: adding an item
//! that is already present folds its quantity into the existing entry.

use crate::model::{MenuItem, MenuItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a menu item taken when it was put in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRef {
    pub id: MenuItemId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl From<&MenuItem> for MenuItemRef {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            category: item.category.clone(),
        }
    }
}

/// One menu item with quantity and instructions, priced at the moment it was ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub menu_item: MenuItemRef,
    pub quantity: u32,
    #[serde(default)]
    pub special_instructions: String,
    pub unit_price: Decimal,
}

impl OrderLineItem {
    /// Creates a line item priced at the menu item's current price.
    pub fn new(menu_item: MenuItemRef, quantity: u32) -> Self {
        let unit_price = menu_item.price;
        Self {
            menu_item,
            quantity,
            special_instructions: String::new(),
            unit_price,
        }
    }

    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self::new(MenuItemRef::from(item), quantity)
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = instructions.into();
        self
    }

    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item.id
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Adds `item` to `items`, folding its quantity into an existing entry with the same menu
/// item id. The existing entry keeps its price and instructions.
pub fn merge_line_item(items: &mut Vec<OrderLineItem>, item: OrderLineItem) {
    match items
        .iter_mut()
        .find(|existing| existing.menu_item_id() == item.menu_item_id())
    {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
        None => items.push(item),
    }
}

/// Merges every item of `incoming` in order, collapsing duplicates.
pub fn merge_line_items(incoming: Vec<OrderLineItem>) -> Vec<OrderLineItem> {
    let mut merged = Vec::with_capacity(incoming.len());
    for item in incoming {
        merge_line_item(&mut merged, item);
    }
    merged
}

/// Sets the quantity of the matching item. A quantity below one removes it.
pub fn set_quantity(items: &mut Vec<OrderLineItem>, id: MenuItemId, quantity: i64) {
    if quantity < 1 {
        remove_line_item(items, id);
        return;
    }
    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    if let Some(item) = items.iter_mut().find(|item| item.menu_item_id() == id) {
        item.quantity = quantity;
    }
}

/// Replaces the special instructions of the matching item.
pub fn set_instructions(items: &mut [OrderLineItem], id: MenuItemId, instructions: &str) {
    if let Some(item) = items.iter_mut().find(|item| item.menu_item_id() == id) {
        item.special_instructions = instructions.to_string();
    }
}

/// Drops the matching item. Absent ids are a no-op.
pub fn remove_line_item(items: &mut Vec<OrderLineItem>, id: MenuItemId) {
    items.retain(|item| item.menu_item_id() != id);
}

/// Σ(unit price × quantity).
pub fn line_items_total(items: &[OrderLineItem]) -> Decimal {
    items.iter().map(OrderLineItem::line_total).sum()
}
