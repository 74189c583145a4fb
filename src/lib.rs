//! # PipeWeave
//!
//! Push-based object streaming: small nodes that accept an item, do something
//! with it and push zero or more results to whatever is piped downstream.
//!
//! Pipelines are built by linking nodes with [`Pipe::pipe`], which returns the
//! node just linked so that chains read left to right. External code feeds the
//! head of a pipeline through [`Node::input`].
//!
//! ## Key Features
//!
//! - **Synchronous, depth-first delivery**: an emitted item reaches every
//!   recipient, in registration order, before the emitting call returns
//! - **Fan-out and merge**: a node may be piped to many recipients and a
//!   recipient may be piped from many producers
//! - **Batching**: collect items by count, by idle time or by a fixed delay
//! - **Backpressure**: feed a slow (typically asynchronous) node one item at a time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pipeweave::{BatchConfig, Node, Pipe};
//! use pipeweave::nodes::{batch, collect, filter, map, source};
//!
//! let numbers = source::<u32>();
//! let batches = numbers
//!   .pipe(filter(|n: &u32| n % 7 != 0))
//!   .pipe(map(|n: u32| n * 2))
//!   .pipe(batch(BatchConfig::new().max_items(3))?)
//!   .pipe(collect());
//!
//! for n in 1..=6 {
//!   numbers.input(n)?;
//! }
//! assert_eq!(batches.items(), vec![vec![2, 4, 6], vec![8, 10, 12]]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Runtime
//!
//! Timer-driven batching and asynchronous transforms schedule work on the
//! ambient tokio runtime. The scheduling model assumed throughout is a single
//! cooperative event loop, i.e. tokio's current-thread runtime: items fed
//! before the feeding task yields are processed before any timer or suspended
//! transform resumes. A batch node with a timer policy enforces this and
//! returns [`NodeError::UnsupportedRuntime`] when fed from a multi-thread
//! runtime, which is what a bare `#[tokio::main]` builds; use
//! `#[tokio::main(flavor = "current_thread")]`.

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Error types for node construction and dispatch.
pub mod error;
/// Core node contract.
pub mod node;
/// Built-in nodes.
pub mod nodes;
/// Fan-out dispatch.
pub mod routers;

pub use error::{ConfigError, NodeError, Result};
pub use node::{Node, Pipe};
pub use nodes::BatchConfig;
pub use routers::{Broadcast, Emitter};

#[cfg(test)]
mod error_test;
