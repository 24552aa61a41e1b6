//! # Order Client
//!
//! High-level API over the `Order` actor: placing orders, amending them before the kitchen
//! starts, moving them through the status lifecycle and computing statistics.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    Order, OrderCreate, OrderId, OrderLineItem, OrderStatus, OrderUpdate, StaffCredential,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::stats::OrderStats;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Validation (non-empty items, quantities, table numbers, transitions, role gates) happens
/// inside the actor; this client only shapes requests and recovers [`OrderError`].
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places a new order. Duplicate menu items in `params.items` are merged.
    #[instrument(skip(self, params), fields(customer = %params.customer, items = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(OrderError::from)?;
        info!(order = %id, "Order placed");
        Ok(id)
    }

    /// Replaces the line items of an order that is still pending or confirmed.
    #[instrument(skip(self, items))]
    pub async fn update_items(
        &self,
        id: OrderId,
        items: Vec<OrderLineItem>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let update = OrderUpdate {
            items: Some(items),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn set_table(&self, id: OrderId, table_number: u32) -> Result<Order, OrderError> {
        debug!("Sending request");
        let update = OrderUpdate {
            table_number: Some(table_number),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(OrderError::from)
    }

    /// Moves an order to `status` on behalf of `by`.
    ///
    /// Returns the order as it is after the change.
    #[instrument(skip(self, by), fields(staff = %by.staff_id))]
    pub async fn update_status(
        &self,
        by: &StaffCredential,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let action = OrderAction::UpdateStatus {
            to: status,
            by: by.clone(),
        };
        match self.inner.perform_action(id, action).await {
            Ok(OrderActionResult::UpdateStatus(order)) => Ok(order),
            Err(e) => Err(OrderError::from(e)),
        }
    }

    pub async fn cancel(&self, by: &StaffCredential, id: OrderId) -> Result<Order, OrderError> {
        self.update_status(by, id, OrderStatus::Cancelled).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    /// Orders that are neither served nor cancelled.
    pub async fn active_orders(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        Ok(orders.into_iter().filter(|o| !o.is_archived()).collect())
    }

    /// Statistics over every order, relative to `now`.
    #[instrument(skip(self))]
    pub async fn stats(
        &self,
        now: DateTime<Utc>,
        best_sellers_limit: usize,
    ) -> Result<OrderStats, OrderError> {
        let orders = self.list().await?;
        Ok(OrderStats::compute(&orders, now, best_sellers_limit))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
