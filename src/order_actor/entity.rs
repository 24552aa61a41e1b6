//! ActorEntity trait implementation for the Order domain type.
//!
//! Enforces the order lifecycle: items are validated and merged on creation, may change only
//! while the order is pending or confirmed, and status moves one step forward at a time (or
//! to cancelled) under a staff credential allowed to set the target status.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::line_item::merge_line_items;
use crate::model::{
    Order, OrderCreate, OrderId, OrderLineItem, OrderType, OrderUpdate, StatusChange,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Rejects empty lists and zero quantities, then collapses duplicate menu items.
fn validate_items(items: Vec<OrderLineItem>) -> Result<Vec<OrderLineItem>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    if let Some(bad) = items.iter().find(|item| item.quantity == 0) {
        return Err(OrderError::InvalidQuantity {
            item: bad.menu_item.name.clone(),
            quantity: bad.quantity,
        });
    }
    Ok(merge_line_items(items))
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.customer.trim().is_empty() {
            return Err(OrderError::ValidationError("customer is required".to_string()));
        }
        if params.order_type == OrderType::DineIn && params.table_number.is_none() {
            return Err(OrderError::ValidationError(
                "dine-in orders need a table number".to_string(),
            ));
        }
        let items = validate_items(params.items)?;
        Ok(Self::new(
            id,
            params.customer,
            params.order_type,
            params.table_number,
            items,
        ))
    }

    /// # Fields Updated
    /// - `items`: replaced wholesale (validated and merged), total recomputed
    /// - `table_number`
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if !self.status.allows_item_changes() {
            return Err(OrderError::Locked(self.status));
        }
        if let Some(items) = update.items {
            self.items = validate_items(items)?;
            self.recompute_total();
        }
        if let Some(table_number) = update.table_number {
            self.table_number = Some(table_number);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Only archived (served or cancelled) orders may be purged.
    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.is_archived() {
            Ok(())
        } else {
            Err(OrderError::ValidationError(format!(
                "{} is still {}",
                self.id, self.status
            )))
        }
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::UpdateStatus { to, by } => {
                if !by.role.may_set(to) {
                    return Err(OrderError::Unauthorized {
                        role: by.role,
                        status: to,
                    });
                }
                if !self.status.can_transition_to(to) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to,
                    });
                }

                let now = Utc::now();
                self.history.push(StatusChange {
                    from: self.status,
                    to,
                    staff_id: by.staff_id.clone(),
                    at: now,
                });
                info!(order = %self.id, from = %self.status, %to, staff = %by.staff_id, "Status changed");
                self.status = to;
                self.updated_at = now;
                Ok(OrderActionResult::UpdateStatus(self.clone()))
            }
        }
    }
}
