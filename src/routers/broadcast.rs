//! # Broadcast Router
//!
//! The fan-out dispatcher every producing node embeds. It holds the ordered,
//! append-only list of downstream recipients and replicates each emitted item
//! to all of them.
//!
//! ## Delivery
//!
//! - Recipients are notified in registration order.
//! - Each recipient's `input` runs to completion before the next one is called.
//! - The recipient list is read once per emission; a recipient piped while an
//!   emission is in progress first sees the next item.
//! - The first recipient error stops the emission and is returned. Recipients
//!   after it do not see the item.
//! - The same recipient may be registered more than once and then receives
//!   every item once per registration.

use crate::error::Result;
use crate::node::Node;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Ordered fan-out of emitted items to downstream recipients.
pub struct Broadcast<O> {
  /// Downstream recipients in registration order.
  recipients: Mutex<Vec<Arc<dyn Node<O>>>>,
}

impl<O> Broadcast<O> {
  /// Creates a broadcast with no recipients.
  pub fn new() -> Self {
    Self {
      recipients: Mutex::new(Vec::new()),
    }
  }

  /// Appends a recipient to the end of the list.
  pub fn connect(&self, recipient: Arc<dyn Node<O>>) {
    let mut recipients = self
      .recipients
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    recipients.push(recipient);
    trace!(recipients = recipients.len(), "linked downstream node");
  }

  /// Returns the number of registered recipients.
  pub fn len(&self) -> usize {
    self
      .recipients
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  /// Returns `true` when nothing is piped downstream.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn snapshot(&self) -> Vec<Arc<dyn Node<O>>> {
    self
      .recipients
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl<O: Clone> Broadcast<O> {
  /// Delivers `item` to every recipient in registration order.
  ///
  /// The lock is released before any recipient runs, so recipients may pipe
  /// further nodes or feed items back into this node.
  pub fn emit(&self, item: O) -> Result<()> {
    let recipients = self.snapshot();
    trace!(recipients = recipients.len(), "broadcasting item");

    let Some((last, rest)) = recipients.split_last() else {
      return Ok(());
    };
    for recipient in rest {
      recipient.input(item.clone())?;
    }
    // The final recipient takes ownership, saving one clone per emission.
    last.input(item)
  }
}

impl<O> Default for Broadcast<O> {
  fn default() -> Self {
    Self::new()
  }
}

/// Handle through which a user function emits items.
///
/// Cloning an emitter is cheap. Clones stay valid after the call that produced
/// them returns, which is how asynchronous functions emit after suspending.
pub struct Emitter<O> {
  broadcast: Arc<Broadcast<O>>,
}

impl<O> Emitter<O> {
  /// Creates an emitter bound to `broadcast`.
  pub fn new(broadcast: Arc<Broadcast<O>>) -> Self {
    Self { broadcast }
  }
}

impl<O: Clone> Emitter<O> {
  /// Emits one item to every downstream recipient of the owning node.
  pub fn emit(&self, item: O) -> Result<()> {
    self.broadcast.emit(item)
  }
}

impl<O> Clone for Emitter<O> {
  fn clone(&self) -> Self {
    Self {
      broadcast: Arc::clone(&self.broadcast),
    }
  }
}
