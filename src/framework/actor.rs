//! # Generic Actor Server
//!
//! `ResourceActor` owns the state of one resource type and processes requests sequentially,
//! so the store needs no locking.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half of the actor: it owns the store and the receiving end of
/// the channel. Every request, including hooks that await a repository or another actor, runs
/// to completion before the next request is taken off the channel. Two clients mutating the
/// same cart are therefore serialized.
///
/// # Operations
///
/// * **Create**: takes the next id from the internal `u32` counter, calls
///   `T::from_create_params`, then `on_create`, then stores the entity.
/// * **Get**: clone of the entity, or `None`.
/// * **List**: clones of all entities, in id order.
/// * **Update**: `on_update` on the stored entity, returns the updated state.
/// * **Delete**: `on_delete`, then removal.
/// * **Action**: `handle_action` on the stored entity, returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls wait
    /// for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Cart" rather than "order_desk::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct TableNo(u32);

    impl From<u32> for TableNo {
        fn from(id: u32) -> Self {
            Self(id)
        }
    }

    impl std::fmt::Display for TableNo {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "table_{}", self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Table {
        id: TableNo,
        seats: u32,
        occupied: bool,
    }

    #[derive(Debug)]
    struct TableCreate {
        seats: u32,
    }

    #[derive(Debug)]
    struct TableUpdate {
        seats: Option<u32>,
    }

    #[derive(Debug)]
    enum TableAction {
        Seat,
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum TableError {
        #[error("a table needs at least one seat")]
        NoSeats,
        #[error("table is occupied")]
        Occupied,
    }

    #[async_trait]
    impl ActorEntity for Table {
        type Id = TableNo;
        type Create = TableCreate;
        type Update = TableUpdate;
        type Action = TableAction;
        type ActionResult = bool;
        type Context = ();
        type Error = TableError;

        fn from_create_params(id: TableNo, params: TableCreate) -> Result<Self, TableError> {
            if params.seats == 0 {
                return Err(TableError::NoSeats);
            }
            Ok(Self {
                id,
                seats: params.seats,
                occupied: false,
            })
        }

        async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), TableError> {
            if let Some(seats) = update.seats {
                self.seats = seats;
            }
            Ok(())
        }

        async fn on_delete(&self, _ctx: &()) -> Result<(), TableError> {
            if self.occupied {
                return Err(TableError::Occupied);
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: TableAction, _ctx: &()) -> Result<bool, TableError> {
            match action {
                TableAction::Seat => {
                    if self.occupied {
                        Ok(false)
                    } else {
                        self.occupied = true;
                        Ok(true)
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let (actor, client) = ResourceActor::<Table>::new(10);
        tokio::spawn(actor.run(()));

        let id = client.create(TableCreate { seats: 4 }).await.unwrap();
        assert_eq!(id, TableNo(1));

        assert!(client.perform_action(id.clone(), TableAction::Seat).await.unwrap());
        assert!(!client.perform_action(id.clone(), TableAction::Seat).await.unwrap());

        let updated = client
            .update(id.clone(), TableUpdate { seats: Some(6) })
            .await
            .unwrap();
        assert_eq!(updated.seats, 6);
        assert!(updated.occupied);

        // Occupied tables refuse deletion through the hook.
        let err = client.delete(id.clone()).await.unwrap_err();
        assert_eq!(err.into_entity_error::<TableError>().unwrap(), TableError::Occupied);
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_returns_entities_in_id_order() {
        let (actor, client) = ResourceActor::<Table>::new(10);
        tokio::spawn(actor.run(()));

        for seats in [2, 4, 8] {
            client.create(TableCreate { seats }).await.unwrap();
        }
        let seats: Vec<u32> = client.list().await.unwrap().iter().map(|t| t.seats).collect();
        assert_eq!(seats, vec![2, 4, 8]);
    }

    #[tokio::test]
    async fn test_failed_create_is_not_stored() {
        let (actor, client) = ResourceActor::<Table>::new(10);
        tokio::spawn(actor.run(()));

        let err = client.create(TableCreate { seats: 0 }).await.unwrap_err();
        assert_eq!(err.into_entity_error::<TableError>().unwrap(), TableError::NoSeats);
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let (actor, client) = ResourceActor::<Table>::new(10);
        tokio::spawn(actor.run(()));

        let err = client
            .perform_action(TableNo(9), TableAction::Seat)
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "table_9"));
    }
}
