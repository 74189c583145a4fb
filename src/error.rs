//! # Error Types
//!
//! Two error families exist:
//!
//! - **[`ConfigError`]**: returned when a node is constructed with an invalid
//!   configuration. No node is produced.
//! - **[`NodeError`]**: returned from [`Node::input`](crate::node::Node::input)
//!   when a user function (or a node downstream of it) fails while the input is
//!   being dispatched.
//!
//! Nothing in the crate catches, retries or isolates a [`NodeError`]. A failing
//! recipient aborts the fan-out it was reached from: recipients registered
//! before it have already seen the item, recipients after it never will.

use std::error::Error as StdError;
use thiserror::Error;

/// Convenience alias for dispatch results.
pub type Result<T, E = NodeError> = std::result::Result<T, E>;

/// Error raised while constructing a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  /// A batch was configured with both an idle and a delay timeout.
  #[error("idleTimeout and delayTimeout are mutually exclusive")]
  IdleAndDelay,
  /// A batch was configured to flush after zero items.
  #[error("maxItems must be at least 1")]
  ZeroMaxItems,
  /// A bounded splitting node was given a length bound of zero.
  #[error("split length must be at least 1")]
  ZeroLength,
}

/// Error raised while an input is dispatched through a pipeline.
#[derive(Error, Debug)]
pub enum NodeError {
  /// A user function reported a failure.
  #[error("node function failed: {0}")]
  Failed(String),
  /// A foreign error bubbled out of a user function.
  #[error(transparent)]
  Source(#[from] Box<dyn StdError + Send + Sync>),
  /// The node needs to schedule a timer or task but no tokio runtime is active.
  #[error("no tokio runtime available to schedule node work")]
  NoRuntime,
  /// Timer-driven batching was fed from a runtime other than tokio's
  /// current-thread scheduler.
  #[error("timer-driven batching requires a current-thread tokio runtime")]
  UnsupportedRuntime,
}

impl NodeError {
  /// Creates a [`NodeError::Failed`] carrying `message`.
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed(message.into())
  }
}

impl From<String> for NodeError {
  fn from(message: String) -> Self {
    Self::Failed(message)
  }
}

impl From<&str> for NodeError {
  fn from(message: &str) -> Self {
    Self::Failed(message.to_string())
  }
}
