//! # Routers
//!
//! Dispatch primitives embedded in producing nodes.
//!
//! - **[`Broadcast`]**: ordered fan-out of every emitted item to all recipients
//! - **[`Emitter`]**: cloneable handle onto a node's broadcast, handed to user
//!   functions so they can emit now or after suspending

pub mod broadcast;
#[cfg(test)]
mod broadcast_test;

pub use broadcast::{Broadcast, Emitter};
