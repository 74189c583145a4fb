//! # Branch Node
//!
//! Routes every input to exactly one of two entry nodes depending on a
//! predicate. Downstream pipelines hang off [`BranchNode::matched`] and
//! [`BranchNode::unmatched`].
//!
//! ```rust,no_run
//! use pipeweave::node::{Node, Pipe};
//! use pipeweave::nodes::{branch, collect};
//!
//! let parity = branch(|n: &u32| n % 2 == 0);
//! let even = parity.matched().pipe(collect());
//! let odd = parity.unmatched().pipe(collect());
//! for n in 1..=4 {
//!   parity.input(n)?;
//! }
//! assert_eq!(even.items(), vec![2, 4]);
//! assert_eq!(odd.items(), vec![1, 3]);
//! # Ok::<(), pipeweave::NodeError>(())
//! ```

use crate::error::Result;
use crate::node::Node;
use crate::nodes::entry_node::{EntryNode, source};
use crate::nodes::transform_node::{transform, transform_async};
use std::future::Future;
use std::sync::Arc;

/// A node splitting its input into a matched and an unmatched stream.
pub struct BranchNode<T> {
  router: Arc<dyn Node<T>>,
  matched: Arc<EntryNode<T>>,
  unmatched: Arc<EntryNode<T>>,
}

impl<T> BranchNode<T>
where
  T: Clone + Send + 'static,
{
  /// Head of the stream of inputs the predicate accepted.
  pub fn matched(&self) -> &Arc<EntryNode<T>> {
    &self.matched
  }

  /// Head of the stream of inputs the predicate rejected.
  pub fn unmatched(&self) -> &Arc<EntryNode<T>> {
    &self.unmatched
  }
}

impl<T> Node<T> for BranchNode<T>
where
  T: Clone + Send + 'static,
{
  fn input(&self, item: T) -> Result<()> {
    self.router.input(item)
  }
}

/// Creates a branch driven by a synchronous predicate.
pub fn branch<T, P>(predicate: P) -> Arc<BranchNode<T>>
where
  T: Clone + Send + 'static,
  P: Fn(&T) -> bool + Send + Sync + 'static,
{
  let matched = source::<T>();
  let unmatched = source::<T>();
  let (on_match, on_miss) = (matched.clone(), unmatched.clone());
  let router = transform::<T, (), _>(move |item, _| {
    if predicate(&item) {
      on_match.input(item)
    } else {
      on_miss.input(item)
    }
  });
  Arc::new(BranchNode {
    router,
    matched,
    unmatched,
  })
}

/// Creates a branch driven by an asynchronous predicate.
///
/// The predicate receives a clone of the input; the original is routed.
pub fn branch_async<T, P, Fut>(predicate: P) -> Arc<BranchNode<T>>
where
  T: Clone + Send + 'static,
  P: Fn(T) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<bool>> + Send + 'static,
{
  let matched = source::<T>();
  let unmatched = source::<T>();
  let (on_match, on_miss) = (matched.clone(), unmatched.clone());
  let router = transform_async::<T, (), _, _>(move |item: T, _| {
    let verdict = predicate(item.clone());
    let (on_match, on_miss) = (on_match.clone(), on_miss.clone());
    async move {
      if verdict.await? {
        on_match.input(item)
      } else {
        on_miss.input(item)
      }
    }
  });
  Arc::new(BranchNode {
    router,
    matched,
    unmatched,
  })
}
