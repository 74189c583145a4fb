//! # Entry Node
//!
//! The addressable head of a pipeline. External code feeds items in through
//! [`Node::input`] and the node passes each one, unchanged, to its downstream
//! recipients.

use crate::error::Result;
use crate::node::{Node, Pipe};
use crate::routers::Broadcast;
use std::sync::Arc;

/// An identity node used as a pipeline head.
pub struct EntryNode<T> {
  broadcast: Broadcast<T>,
}

impl<T> EntryNode<T> {
  /// Creates an entry node with no recipients.
  pub fn new() -> Self {
    Self {
      broadcast: Broadcast::new(),
    }
  }
}

impl<T> Default for EntryNode<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Node<T> for EntryNode<T>
where
  T: Clone + Send + 'static,
{
  fn input(&self, item: T) -> Result<()> {
    self.broadcast.emit(item)
  }
}

impl<T> Pipe<T> for EntryNode<T> {
  fn broadcast(&self) -> &Broadcast<T> {
    &self.broadcast
  }
}

/// Creates a pipeline head for items of type `T`.
pub fn source<T>() -> Arc<EntryNode<T>>
where
  T: Clone + Send + 'static,
{
  Arc::new(EntryNode::new())
}
