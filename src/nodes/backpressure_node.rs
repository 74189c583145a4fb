//! # Backpressure Node
//!
//! Wraps a node and feeds it one input at a time.
//!
//! Inputs are queued in arrival order. The oldest queued input is handed to
//! the wrapped node only when nothing is in flight; an input counts as in
//! flight from the moment it is handed over until the wrapped node emits. Every
//! output of the wrapped node is re-emitted to this node's own recipients,
//! after which the next queued input is released.
//!
//! This restores one-at-a-time processing for asynchronous transforms whose
//! overlapping invocations would otherwise complete out of order.
//!
//! ## Caller Contract
//!
//! The wrapped node must emit at least once for every input it receives. There
//! is no signal that tells "dropped" apart from "still working", so a wrapped
//! node that filters an input out, or fails synchronously while processing
//! it, leaves that input in flight forever and the queue stalls.

use crate::error::Result;
use crate::node::{Node, Pipe};
use crate::routers::Broadcast;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::trace;

struct Queue<I> {
  pending: VecDeque<I>,
  in_flight: bool,
}

/// A node serializing inputs to a wrapped node.
pub struct BackpressureNode<I, O> {
  inner: Arc<dyn Node<I>>,
  queue: Mutex<Queue<I>>,
  broadcast: Broadcast<O>,
}

impl<I, O> BackpressureNode<I, O>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
{
  /// Wraps `inner`, observing its outputs to learn when an input completed.
  ///
  /// The returned node holds `inner`; `inner` only refers back weakly.
  pub fn wrap<S>(inner: Arc<S>) -> Arc<Self>
  where
    S: Node<I> + Pipe<O> + 'static,
  {
    Arc::new_cyclic(|owner| {
      inner.pipe(Arc::new(Completion {
        owner: owner.clone(),
      }));
      Self {
        inner,
        queue: Mutex::new(Queue {
          pending: VecDeque::new(),
          in_flight: false,
        }),
        broadcast: Broadcast::new(),
      }
    })
  }

  /// Number of inputs waiting to be handed to the wrapped node.
  pub fn queued(&self) -> usize {
    self.lock().pending.len()
  }

  /// Returns `true` while the wrapped node owes an output.
  pub fn in_flight(&self) -> bool {
    self.lock().in_flight
  }

  fn lock(&self) -> MutexGuard<'_, Queue<I>> {
    self.queue.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn advance(&self) -> Result<()> {
    let next = {
      let mut queue = self.lock();
      if queue.in_flight {
        return Ok(());
      }
      let Some(item) = queue.pending.pop_front() else {
        return Ok(());
      };
      queue.in_flight = true;
      trace!(queued = queue.pending.len(), "releasing input to wrapped node");
      item
    };
    self.inner.input(next)
  }

  fn complete(&self, output: O) -> Result<()> {
    let delivered = self.broadcast.emit(output);
    self.lock().in_flight = false;
    delivered?;
    self.advance()
  }
}

impl<I, O> Node<I> for BackpressureNode<I, O>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
{
  fn input(&self, item: I) -> Result<()> {
    self.lock().pending.push_back(item);
    self.advance()
  }
}

impl<I, O> Pipe<O> for BackpressureNode<I, O> {
  fn broadcast(&self) -> &Broadcast<O> {
    &self.broadcast
  }
}

/// Observer piped onto the wrapped node.
struct Completion<I, O> {
  owner: Weak<BackpressureNode<I, O>>,
}

impl<I, O> Node<O> for Completion<I, O>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
{
  fn input(&self, output: O) -> Result<()> {
    match self.owner.upgrade() {
      Some(owner) => owner.complete(output),
      None => Ok(()),
    }
  }
}

/// Wraps `inner` in a [`BackpressureNode`].
pub fn backpressure<I, O, S>(inner: Arc<S>) -> Arc<BackpressureNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  S: Node<I> + Pipe<O> + 'static,
{
  BackpressureNode::wrap(inner)
}
