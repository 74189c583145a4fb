//! # Collect Node
//!
//! A sink recording every input it receives, in arrival order.

use crate::error::Result;
use crate::node::Node;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A sink accumulating inputs into a vector.
pub struct CollectNode<T> {
  items: Mutex<Vec<T>>,
}

impl<T> CollectNode<T> {
  /// Creates an empty sink.
  pub fn new() -> Self {
    Self {
      items: Mutex::new(Vec::new()),
    }
  }

  /// Number of items received so far.
  pub fn len(&self) -> usize {
    self.lock().len()
  }

  /// Returns `true` when nothing has been received.
  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  /// Removes and returns everything received so far.
  pub fn take(&self) -> Vec<T> {
    std::mem::take(&mut *self.lock())
  }

  fn lock(&self) -> MutexGuard<'_, Vec<T>> {
    self.items.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<T: Clone> CollectNode<T> {
  /// Returns a copy of everything received so far.
  pub fn items(&self) -> Vec<T> {
    self.lock().clone()
  }
}

impl<T> Default for CollectNode<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Node<T> for CollectNode<T>
where
  T: Send,
{
  fn input(&self, item: T) -> Result<()> {
    self.lock().push(item);
    Ok(())
  }
}

/// Creates a sink recording every input.
pub fn collect<T>() -> Arc<CollectNode<T>>
where
  T: Send + 'static,
{
  Arc::new(CollectNode::new())
}
