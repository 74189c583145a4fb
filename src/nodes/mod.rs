//! # Node Library
//!
//! Built-in nodes. All implement [`Node`](crate::node::Node); producing nodes
//! also implement [`Pipe`](crate::node::Pipe).
//!
//! ## Core Nodes
//!
//! - **EntryNode** (`source`): identity node heading a pipeline
//! - **TransformNode** (`transform`, `transform_async`): user `(input, emit)` body
//! - **BatchNode** (`batch`): buffers inputs and emits them as `Vec`s
//! - **BackpressureNode** (`backpressure`): feeds a wrapped node one input at a time
//!
//! ## Adapters
//!
//! Thin constructors over the core nodes:
//!
//! - `map`, `try_map`, `map_async`: one output per input
//! - `filter`, `filter_async`: pass inputs a predicate accepts
//! - `for_each`, `for_each_async`: side effect, then pass through
//! - `spread`, `split`: break a `Vec` into elements or bounded chunks
//! - `branch`, `branch_async`: route to a matched or unmatched stream
//! - `merge`: one stream fed by several producers
//! - `collect`: sink recording its inputs

pub mod backpressure_node;
pub mod batch_config;
#[cfg(test)]
mod batch_config_test;
pub mod batch_node;
pub mod branch_node;
pub mod collect_node;
pub mod entry_node;
pub mod filter_node;
pub mod for_each_node;
pub mod map_node;
pub mod merge_node;
pub mod split_node;
pub mod transform_node;
#[cfg(test)]
mod transform_node_test;

pub use backpressure_node::{BackpressureNode, backpressure};
pub use batch_config::BatchConfig;
pub use batch_node::{BatchNode, batch};
pub use branch_node::{BranchNode, branch, branch_async};
pub use collect_node::{CollectNode, collect};
pub use entry_node::{EntryNode, source};
pub use filter_node::{filter, filter_async};
pub use for_each_node::{for_each, for_each_async};
pub use map_node::{map, map_async, try_map};
pub use merge_node::merge;
pub use split_node::{split, spread};
pub use transform_node::{
  TransformConfig, TransformFunction, TransformNode, transform, transform_async, transform_fn,
};
