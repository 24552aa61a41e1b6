//! Pure data structures (DTOs) implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod cart;
pub mod line_item;
pub mod menu;
pub mod order;

pub use cart::*;
pub use line_item::*;
pub use menu::*;
pub use order::*;
