/// Represents a placed restaurant order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Update parameters ([`OrderUpdate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
use crate::model::line_item::{line_items_total, OrderLineItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Kitchen status of an order.
///
/// Orders move forward one step at a time through
/// `Pending → Confirmed → Preparing → Ready → Served`, or drop to `Cancelled` from any
/// non-terminal status. `Served` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    /// The status that follows this one on the happy path.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Line items may only change before the kitchen has accepted the order.
    pub fn allows_item_changes(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == OrderStatus::Cancelled || self.next() == Some(to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

/// Who may move an order into which status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Waiter,
    Kitchen,
    Manager,
}

impl StaffRole {
    pub fn may_set(self, status: OrderStatus) -> bool {
        match self {
            StaffRole::Manager => true,
            StaffRole::Kitchen => matches!(status, OrderStatus::Preparing | OrderStatus::Ready),
            StaffRole::Waiter => matches!(
                status,
                OrderStatus::Confirmed | OrderStatus::Served | OrderStatus::Cancelled
            ),
        }
    }
}

/// Credential of the staff member performing a status change.
///
/// Passed explicitly with every status-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCredential {
    pub staff_id: String,
    pub role: StaffRole,
}

impl StaffCredential {
    pub fn new(staff_id: impl Into<String>, role: StaffRole) -> Self {
        Self {
            staff_id: staff_id.into(),
            role,
        }
    }
}

/// One entry of an order's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub staff_id: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLineItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer: String,
    pub table_number: Option<u32>,
    pub order_type: OrderType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub history: Vec<StatusChange>,
}

impl Order {
    /// Creates a pending order. `items` are taken as given; the total is computed from them.
    pub fn new(
        id: OrderId,
        customer: impl Into<String>,
        order_type: OrderType,
        table_number: Option<u32>,
        items: Vec<OrderLineItem>,
    ) -> Self {
        let now = Utc::now();
        let total_amount = line_items_total(&items);
        Self {
            id,
            items,
            total_amount,
            status: OrderStatus::Pending,
            customer: customer.into(),
            table_number,
            order_type,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// Served and cancelled orders are archived.
    pub fn is_archived(&self) -> bool {
        self.status.is_terminal()
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total_amount = line_items_total(&self.items);
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: String,
    pub order_type: OrderType,
    pub table_number: Option<u32>,
    pub items: Vec<OrderLineItem>,
}

/// Changes to an order that has not reached the kitchen yet.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub items: Option<Vec<OrderLineItem>>,
    pub table_number: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_next_step_or_cancel_is_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Ready.can_transition_to(Confirmed));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn item_changes_stop_once_preparing() {
        assert!(OrderStatus::Pending.allows_item_changes());
        assert!(OrderStatus::Confirmed.allows_item_changes());
        assert!(!OrderStatus::Preparing.allows_item_changes());
        assert!(!OrderStatus::Served.allows_item_changes());
    }

    #[test]
    fn kitchen_cannot_serve_or_cancel() {
        assert!(StaffRole::Kitchen.may_set(OrderStatus::Ready));
        assert!(!StaffRole::Kitchen.may_set(OrderStatus::Served));
        assert!(!StaffRole::Kitchen.may_set(OrderStatus::Cancelled));
        assert!(StaffRole::Waiter.may_set(OrderStatus::Cancelled));
        assert!(!StaffRole::Waiter.may_set(OrderStatus::Preparing));
        assert!(OrderStatus::ALL.iter().all(|s| StaffRole::Manager.may_set(*s)));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing).unwrap(), "\"preparing\"");
        assert_eq!(serde_json::to_string(&OrderType::DineIn).unwrap(), "\"dine-in\"");
    }
}
