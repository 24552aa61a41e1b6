//! # Order Statistics
//!
//! Aggregate metrics over the order book, and their export as CSV sheets and a printable
//! report (see [`export`]).
//!
//! Cancelled orders count towards `today_order_count` and `orders_by_status` only; every money
//! figure and the best-seller ranking ignore them. Time windows are UTC calendar windows
//! containing `now`: the day, the ISO week and the year.

pub mod export;

pub use export::*;

use crate::model::{MenuItemId, Order, OrderStatus};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Sales of one dish across all non-cancelled orders.
#[derive(Debug, Clone, PartialEq)]
pub struct DishSales {
    pub menu_item: MenuItemId,
    pub name: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderStats {
    pub daily_earnings: Decimal,
    pub weekly_earnings: Decimal,
    pub yearly_earnings: Decimal,
    pub today_order_count: usize,
    /// Mean total of non-cancelled orders, two decimal places; zero when there are none.
    pub avg_order_value: Decimal,
    /// One entry per status, zero counts included.
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    /// Highest quantity first; ties in name order.
    pub best_selling_dishes: Vec<DishSales>,
}

impl OrderStats {
    pub fn compute(orders: &[Order], now: DateTime<Utc>, best_sellers_limit: usize) -> Self {
        let today = now.date_naive();
        let week = now.iso_week();

        let mut daily_earnings = Decimal::ZERO;
        let mut weekly_earnings = Decimal::ZERO;
        let mut yearly_earnings = Decimal::ZERO;
        let mut today_order_count = 0;
        let mut revenue = Decimal::ZERO;
        let mut billable = 0u32;
        let mut orders_by_status: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut dishes: HashMap<MenuItemId, DishSales> = HashMap::new();

        for order in orders {
            *orders_by_status.entry(order.status).or_insert(0) += 1;
            let created = order.created_at;
            if created.date_naive() == today {
                today_order_count += 1;
            }
            if order.status == OrderStatus::Cancelled {
                continue;
            }

            if created.year() == now.year() {
                yearly_earnings += order.total_amount;
            }
            if created.iso_week() == week {
                weekly_earnings += order.total_amount;
            }
            if created.date_naive() == today {
                daily_earnings += order.total_amount;
            }
            revenue += order.total_amount;
            billable += 1;

            for item in &order.items {
                let entry = dishes
                    .entry(item.menu_item_id())
                    .or_insert_with(|| DishSales {
                        menu_item: item.menu_item_id(),
                        name: item.menu_item.name.clone(),
                        quantity: 0,
                        revenue: Decimal::ZERO,
                    });
                entry.quantity += u64::from(item.quantity);
                entry.revenue += item.line_total();
            }
        }

        let avg_order_value = if billable == 0 {
            Decimal::ZERO
        } else {
            (revenue / Decimal::from(billable)).round_dp(2)
        };

        let mut best_selling_dishes: Vec<DishSales> = dishes.into_values().collect();
        best_selling_dishes.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.menu_item.cmp(&b.menu_item))
        });
        best_selling_dishes.truncate(best_sellers_limit);

        Self {
            daily_earnings,
            weekly_earnings,
            yearly_earnings,
            today_order_count,
            avg_order_value,
            orders_by_status,
            best_selling_dishes,
        }
    }
}
