//! # Node Contract
//!
//! Every processing unit implements [`Node`]: it accepts one item at a time
//! through [`Node::input`]. Units that produce items also implement [`Pipe`],
//! which exposes the unit's [`Broadcast`] and lets composition code register
//! downstream recipients.
//!
//! ## Propagation
//!
//! Emission is push-based and synchronous. When a node emits, every recipient's
//! `input` is called in registration order before the emit returns, so a chain
//! of synchronous nodes propagates depth-first. Buffering happens only where a
//! node introduces it on purpose (batching, backpressure) or where a user
//! function suspends.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pipeweave::node::{Node, Pipe};
//! use pipeweave::nodes::{collect, filter, map, source};
//!
//! let head = source::<i32>();
//! let sink = head
//!   .pipe(filter(|n: &i32| n % 2 == 0))
//!   .pipe(map(|n: i32| n * 10))
//!   .pipe(collect());
//!
//! for n in 0..5 {
//!   head.input(n)?;
//! }
//! assert_eq!(sink.items(), vec![0, 20, 40]);
//! # Ok::<(), pipeweave::NodeError>(())
//! ```

use crate::error::Result;
use crate::routers::Broadcast;
use std::sync::Arc;

/// A unit that accepts items of type `I`.
///
/// Implementations must not hold internal locks while calling into other
/// nodes or user code; recipients are free to feed items back upstream.
pub trait Node<I>: Send + Sync {
  /// Accepts one item.
  ///
  /// Any error raised by this node or, synchronously, by a node downstream of
  /// it is returned to the caller unchanged.
  fn input(&self, item: I) -> Result<()>;
}

/// A unit that emits items of type `O` to registered recipients.
pub trait Pipe<O> {
  /// Returns the dispatcher holding this node's downstream recipients.
  fn broadcast(&self) -> &Broadcast<O>;

  /// Registers `next` as a downstream recipient and hands it back.
  ///
  /// The returned handle is the newly piped node, so chained calls always
  /// continue from the most recently piped node rather than from `self`.
  fn pipe<N>(&self, next: Arc<N>) -> Arc<N>
  where
    Self: Sized,
    N: Node<O> + 'static,
  {
    self.broadcast().connect(next.clone());
    next
  }
}
