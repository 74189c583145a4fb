//! # Merge Node
//!
//! Joins several producers into one stream by piping all of them into a shared
//! entry node. Items keep the order in which their producers emit them; no
//! ordering is imposed between producers.

use crate::node::Pipe;
use crate::nodes::entry_node::{EntryNode, source};
use std::sync::Arc;

/// Creates an entry node fed by every producer in `sources`.
///
/// The returned node stays open for further producers: pipe more sources into
/// it, or feed it directly.
pub fn merge<T>(sources: &[&dyn Pipe<T>]) -> Arc<EntryNode<T>>
where
  T: Clone + Send + 'static,
{
  let merged = source::<T>();
  for producer in sources {
    producer.broadcast().connect(merged.clone());
  }
  merged
}
