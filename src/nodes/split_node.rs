//! # Split Nodes
//!
//! Transform nodes breaking a collection into smaller outputs.
//!
//! - **spread**: one output per element
//! - **split**: consecutive chunks of at most `n` elements

use crate::error::ConfigError;
use crate::nodes::transform_node::{TransformNode, transform};
use std::sync::Arc;

/// Creates a node emitting each element of an input vector in order.
pub fn spread<T>() -> Arc<TransformNode<Vec<T>, T>>
where
  T: Clone + Send + 'static,
{
  transform(|items: Vec<T>, emit| {
    for item in items {
      emit.emit(item)?;
    }
    Ok(())
  })
}

/// Creates a node emitting consecutive chunks of at most `max_len` elements.
///
/// An empty input emits nothing; only the final chunk may be shorter than
/// `max_len`.
///
/// # Errors
///
/// [`ConfigError::ZeroLength`] when `max_len` is zero.
pub fn split<T>(max_len: usize) -> Result<Arc<TransformNode<Vec<T>, Vec<T>>>, ConfigError>
where
  T: Clone + Send + 'static,
{
  if max_len == 0 {
    return Err(ConfigError::ZeroLength);
  }
  Ok(transform(move |items: Vec<T>, emit| {
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
      emit.emit(items.by_ref().take(max_len).collect())?;
    }
    Ok(())
  }))
}
