//! # Filter Node
//!
//! Transform nodes passing an input through only when a predicate holds.

use crate::error::Result;
use crate::nodes::transform_node::{TransformNode, transform, transform_async};
use std::future::Future;
use std::sync::Arc;

/// Creates a node emitting the inputs for which `predicate` returns `true`.
pub fn filter<T, P>(predicate: P) -> Arc<TransformNode<T, T>>
where
  T: Clone + Send + 'static,
  P: Fn(&T) -> bool + Send + Sync + 'static,
{
  transform(move |item, emit| {
    if predicate(&item) {
      emit.emit(item)
    } else {
      Ok(())
    }
  })
}

/// Creates a node emitting the inputs an asynchronous predicate accepts.
///
/// The predicate receives a clone of the input; the original is emitted.
pub fn filter_async<T, P, Fut>(predicate: P) -> Arc<TransformNode<T, T>>
where
  T: Clone + Send + 'static,
  P: Fn(T) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<bool>> + Send + 'static,
{
  transform_async(move |item: T, emit| {
    let verdict = predicate(item.clone());
    async move {
      if verdict.await? {
        emit.emit(item)?;
      }
      Ok(())
    }
  })
}
