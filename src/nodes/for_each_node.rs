//! # ForEach Node
//!
//! Transform nodes running a side effect for every input and passing the input
//! through unchanged.

use crate::error::Result;
use crate::nodes::transform_node::{TransformNode, transform, transform_async};
use std::future::Future;
use std::sync::Arc;

/// Creates a node calling `effect` on every input before emitting it.
pub fn for_each<T, F>(effect: F) -> Arc<TransformNode<T, T>>
where
  T: Clone + Send + 'static,
  F: Fn(&T) + Send + Sync + 'static,
{
  transform(move |item, emit| {
    effect(&item);
    emit.emit(item)
  })
}

/// Creates a node awaiting an asynchronous side effect before emitting each input.
///
/// The input is emitted only when the effect succeeds.
pub fn for_each_async<T, F, Fut>(effect: F) -> Arc<TransformNode<T, T>>
where
  T: Clone + Send + 'static,
  F: Fn(T) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<()>> + Send + 'static,
{
  transform_async(move |item: T, emit| {
    let done = effect(item.clone());
    async move {
      done.await?;
      emit.emit(item)
    }
  })
}
