//! Custom actions for the Order actor: status changes made by staff.

use crate::model::{Order, OrderStatus, StaffCredential};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to `to`, which must be the next status or `Cancelled`.
    UpdateStatus { to: OrderStatus, by: StaffCredential },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    UpdateStatus(Order),
}
