//! # Transform Node
//!
//! A node wrapping a user function that receives each input together with an
//! [`Emitter`] bound to the node's broadcast. The function decides how often
//! to emit:
//!
//! - zero times drops the input (filter semantics)
//! - once passes it on, possibly transformed (map / forEach semantics)
//! - several times spreads one input into many outputs
//!
//! ## Synchronous and Asynchronous Bodies
//!
//! A synchronous body runs inside [`Node::input`]; everything it emits has been
//! delivered downstream by the time `input` returns, and any error it or a
//! downstream node raises is returned from `input`.
//!
//! An asynchronous body ([`TransformFunction`]) is spawned on the current tokio
//! runtime and `input` returns as soon as it is scheduled. Overlapping
//! invocations are not serialized, so outputs of different inputs arrive in
//! completion order. Wrap the node in a
//! [`BackpressureNode`](crate::nodes::BackpressureNode) to process one input at
//! a time. Errors of an asynchronous body have no caller left to receive them
//! and are logged at `warn` level.

use crate::error::{NodeError, Result};
use crate::node::{Node, Pipe};
use crate::routers::{Broadcast, Emitter};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::warn;

/// Trait for asynchronous transform bodies.
///
/// Implementations receive the input by value and an owned [`Emitter`], which
/// stays usable across any number of suspension points.
#[async_trait]
pub trait TransformFunction<I, O>: Send + Sync {
  /// Processes one input, emitting any number of outputs through `emit`.
  async fn apply(&self, item: I, emit: Emitter<O>) -> Result<()>;
}

/// Shared handle to an asynchronous transform body.
pub type TransformConfig<I, O> = Arc<dyn TransformFunction<I, O>>;

/// Wrapper type that implements TransformFunction for async closures.
struct TransformFunctionWrapper<F> {
  function: F,
}

#[async_trait]
impl<I, O, F> TransformFunction<I, O> for TransformFunctionWrapper<F>
where
  I: Send + 'static,
  O: Send + 'static,
  F: Fn(I, Emitter<O>) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
  async fn apply(&self, item: I, emit: Emitter<O>) -> Result<()> {
    (self.function)(item, emit).await
  }
}

/// Creates a [`TransformConfig`] from an async closure.
///
/// # Example
///
/// ```rust,no_run
/// use pipeweave::nodes::{TransformConfig, transform_fn};
///
/// let twice: TransformConfig<i32, i32> = transform_fn(|n, emit| async move {
///   emit.emit(n)?;
///   tokio::task::yield_now().await;
///   emit.emit(n)
/// });
/// ```
pub fn transform_fn<I, O, F, Fut>(function: F) -> TransformConfig<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
  F: Fn(I, Emitter<O>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<()>> + Send + 'static,
{
  Arc::new(TransformFunctionWrapper {
    function: move |item: I, emit: Emitter<O>| {
      Box::pin(function(item, emit)) as BoxFuture<'static, Result<()>>
    },
  })
}

type SyncBody<I, O> = Box<dyn Fn(I, &Emitter<O>) -> Result<()> + Send + Sync>;

enum Body<I, O> {
  Sync(SyncBody<I, O>),
  Async(TransformConfig<I, O>),
}

/// A node applying a user function to every input.
pub struct TransformNode<I, O> {
  body: Body<I, O>,
  broadcast: Arc<Broadcast<O>>,
}

impl<I, O> TransformNode<I, O>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
{
  /// Creates a node with a synchronous body.
  pub fn new<F>(function: F) -> Arc<Self>
  where
    F: Fn(I, &Emitter<O>) -> Result<()> + Send + Sync + 'static,
  {
    Arc::new(Self {
      body: Body::Sync(Box::new(function)),
      broadcast: Arc::new(Broadcast::new()),
    })
  }

  /// Creates a node with an asynchronous body.
  pub fn with_function(function: TransformConfig<I, O>) -> Arc<Self> {
    Arc::new(Self {
      body: Body::Async(function),
      broadcast: Arc::new(Broadcast::new()),
    })
  }

  /// Returns an emitter bound to this node's downstream recipients.
  pub fn emitter(&self) -> Emitter<O> {
    Emitter::new(Arc::clone(&self.broadcast))
  }
}

impl<I, O> Node<I> for TransformNode<I, O>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
{
  fn input(&self, item: I) -> Result<()> {
    match &self.body {
      Body::Sync(function) => function(item, &self.emitter()),
      Body::Async(function) => {
        let runtime = Handle::try_current().map_err(|_| NodeError::NoRuntime)?;
        let function = Arc::clone(function);
        let emit = self.emitter();
        runtime.spawn(async move {
          if let Err(error) = function.apply(item, emit).await {
            warn!(%error, "asynchronous transform failed");
          }
        });
        Ok(())
      }
    }
  }
}

impl<I, O> Pipe<O> for TransformNode<I, O> {
  fn broadcast(&self) -> &Broadcast<O> {
    &self.broadcast
  }
}

/// Creates a node with a synchronous `(input, emit)` body.
///
/// # Example
///
/// ```rust,no_run
/// use pipeweave::nodes::transform;
///
/// // Emits every word of a line separately.
/// let words = transform(|line: String, emit| {
///   for word in line.split_whitespace() {
///     emit.emit(word.to_string())?;
///   }
///   Ok(())
/// });
/// ```
pub fn transform<I, O, F>(function: F) -> Arc<TransformNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  F: Fn(I, &Emitter<O>) -> Result<()> + Send + Sync + 'static,
{
  TransformNode::new(function)
}

/// Creates a node with an asynchronous `(input, emit)` body.
pub fn transform_async<I, O, F, Fut>(function: F) -> Arc<TransformNode<I, O>>
where
  I: Send + 'static,
  O: Clone + Send + 'static,
  F: Fn(I, Emitter<O>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<()>> + Send + 'static,
{
  TransformNode::with_function(transform_fn(function))
}
