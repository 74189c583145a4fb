//! # Map Node
//!
//! Transform nodes emitting exactly one output per input.

use crate::error::Result;
use crate::nodes::transform_node::{TransformNode, transform, transform_async};
use std::future::Future;
use std::sync::Arc;

/// Creates a node applying an infallible function to every input.
pub fn map<I, O, F>(function: F) -> Arc<TransformNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  F: Fn(I) -> O + Send + Sync + 'static,
{
  transform(move |item, emit| emit.emit(function(item)))
}

/// Creates a node applying a fallible function to every input.
///
/// An `Err` is returned from `input` and nothing is emitted for that item.
pub fn try_map<I, O, F>(function: F) -> Arc<TransformNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  F: Fn(I) -> Result<O> + Send + Sync + 'static,
{
  transform(move |item, emit| emit.emit(function(item)?))
}

/// Creates a node applying an asynchronous function to every input.
pub fn map_async<I, O, F, Fut>(function: F) -> Arc<TransformNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  F: Fn(I) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<O>> + Send + 'static,
{
  transform_async(move |item, emit| {
    let mapped = function(item);
    async move { emit.emit(mapped.await?) }
  })
}
