//! # System Lifecycle
//!
//! Starting, wiring and shutting down the actors.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when started with
//! `run(context)`. The cart actor is the only one with a context: a
//! [`CartContext`](crate::cart_actor::CartContext) holding the cart repository and an
//! [`OrderClient`](crate::clients::OrderClient) for checkout.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, closing the sender side of each channel
//! 2. **Actors detect closure** when `receiver.recv()` returns `None`
//! 3. **Await completion** of every actor task
//!
//! The cart actor's order client is a clone, so the order actor exits only after the cart
//! actor has. The dependency graph is acyclic, which is what makes channel closure enough.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use tracing::*;
