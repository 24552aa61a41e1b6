//! Generic actor framework for resource management.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - trait that resource types implement to be managed by an actor
//! - [`ResourceActor`] - the generic actor that owns a collection of entities
//! - [`ResourceClient`] - the cloneable, typed handle used to talk to an actor
//! - [`FrameworkError`] - plumbing errors (closed channels, unknown ids, wrapped entity errors)
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
