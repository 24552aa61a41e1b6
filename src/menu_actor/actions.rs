//! Custom actions for the Menu actor.

use crate::model::MenuItem;

#[derive(Debug, Clone)]
pub enum MenuAction {
    /// Marks a dish as sold out (`false`) or back on the menu (`true`).
    SetAvailability(bool),
}

/// Results from MenuActions - variants match 1:1 with MenuAction
#[derive(Debug, Clone)]
pub enum MenuActionResult {
    SetAvailability(MenuItem),
}
