//! # Batch Node
//!
//! A stateful node accumulating inputs into a buffer and emitting the whole
//! buffer as one `Vec` when a flush is triggered.
//!
//! ## States
//!
//! - **Empty**: buffer empty, no timer armed
//! - **Accumulating**: buffer non-empty, zero or more timers armed
//!
//! ## Input
//!
//! 1. Any armed idle timer is cancelled; every input resets the idle clock.
//! 2. The item is appended to the buffer.
//! 3. With `maxItems` set and the buffer at or above it, the buffer is flushed
//!    immediately and no timer is armed.
//! 4. Otherwise, with an idle timeout, a fresh idle timer is armed.
//! 5. Otherwise, with a delay timeout and no delay timer armed, a delay timer is
//!    armed. Later inputs do not move that deadline.
//!
//! ## Flush
//!
//! A flush cancels any armed delay timer, then emits the buffer and leaves it
//! empty. Flushing an empty buffer emits nothing, so the max-items path and
//! either timer can race for the same items without ever emitting twice.
//!
//! Timers always go through the tokio timer, even for a zero idle timeout, so
//! every item fed before the feeding task yields ends up in the same batch.
//! That only holds on a single cooperative event loop: a node with a timer
//! policy must be fed from tokio's current-thread runtime and refuses inputs
//! on any other flavor with [`NodeError::UnsupportedRuntime`].
//!
//! ## Lifecycle
//!
//! An armed timer holds the node alive. Dropping every external handle to a
//! pipeline therefore does not lose buffered items: the pending timer still
//! fires and flushes them downstream.

use crate::error::{ConfigError, NodeError, Result};
use crate::node::{Node, Pipe};
use crate::nodes::batch_config::{BatchConfig, BatchPolicy, TimerPolicy};
use crate::routers::Broadcast;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What caused a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
  MaxItems,
  Idle,
  Delay,
  Manual,
}

/// A scheduled flush.
///
/// The generation tells a firing task whether it is still the armed timer or
/// was replaced after it had already woken up.
struct Timer {
  generation: u64,
  handle: JoinHandle<()>,
}

impl Timer {
  fn cancel(self) {
    self.handle.abort();
  }
}

struct BatchState<T> {
  buffer: Vec<T>,
  idle: Option<Timer>,
  delay: Option<Timer>,
  generation: u64,
}

impl<T> BatchState<T> {
  /// Cancels the delay timer and takes the buffer if it holds anything.
  fn take_batch(&mut self) -> Option<Vec<T>> {
    if let Some(timer) = self.delay.take() {
      timer.cancel();
    }
    if self.buffer.is_empty() {
      None
    } else {
      Some(std::mem::take(&mut self.buffer))
    }
  }
}

/// A node emitting its inputs in batches.
pub struct BatchNode<T> {
  policy: BatchPolicy,
  state: Mutex<BatchState<T>>,
  broadcast: Broadcast<Vec<T>>,
  this: Weak<BatchNode<T>>,
}

impl<T> BatchNode<T>
where
  T: Clone + Send + 'static,
{
  /// Creates a batch node.
  ///
  /// # Errors
  ///
  /// - [`ConfigError::IdleAndDelay`] when both timeouts are set
  /// - [`ConfigError::ZeroMaxItems`] when `maxItems` is zero
  pub fn new(config: BatchConfig) -> Result<Arc<Self>, ConfigError> {
    let policy = config.policy()?;
    Ok(Arc::new_cyclic(|this| Self {
      policy,
      state: Mutex::new(BatchState {
        buffer: Vec::new(),
        idle: None,
        delay: None,
        generation: 0,
      }),
      broadcast: Broadcast::new(),
      this: this.clone(),
    }))
  }

  /// Emits the buffered items now, if there are any.
  ///
  /// Like a timer-driven flush this cancels a pending delay timer. An armed
  /// idle timer stays armed and later finds the buffer empty.
  pub fn flush(&self) -> Result<()> {
    let batch = self.lock().take_batch();
    match batch {
      Some(items) => self.dispatch(items, Trigger::Manual),
      None => Ok(()),
    }
  }

  /// Number of buffered items.
  pub fn len(&self) -> usize {
    self.lock().buffer.len()
  }

  /// Returns `true` when nothing is buffered.
  pub fn is_empty(&self) -> bool {
    self.lock().buffer.is_empty()
  }

  fn lock(&self) -> MutexGuard<'_, BatchState<T>> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn arm(
    &self,
    state: &mut BatchState<T>,
    runtime: &Handle,
    trigger: Trigger,
    after: Duration,
  ) -> Timer {
    state.generation += 1;
    let generation = state.generation;
    // Held by the task until it fires, keeping the node and its buffer alive.
    let node = self.this.upgrade();
    let handle = runtime.spawn(async move {
      tokio::time::sleep(after).await;
      if let Some(node) = node {
        node.fire(trigger, generation);
      }
    });
    Timer { generation, handle }
  }

  fn fire(&self, trigger: Trigger, generation: u64) {
    let batch = {
      let mut state = self.lock();
      let slot = match trigger {
        Trigger::Idle => &mut state.idle,
        Trigger::Delay => &mut state.delay,
        Trigger::MaxItems | Trigger::Manual => return,
      };
      if slot.as_ref().map(|timer| timer.generation) != Some(generation) {
        return;
      }
      // Dropping our own handle detaches the running task.
      *slot = None;
      state.take_batch()
    };
    if let Some(items) = batch {
      if let Err(error) = self.dispatch(items, trigger) {
        warn!(%error, ?trigger, "batch flush failed downstream");
      }
    }
  }

  fn dispatch(&self, items: Vec<T>, trigger: Trigger) -> Result<()> {
    debug!(items = items.len(), ?trigger, "flushing batch");
    self.broadcast.emit(items)
  }
}

impl<T> Node<T> for BatchNode<T>
where
  T: Clone + Send + 'static,
{
  fn input(&self, item: T) -> Result<()> {
    let runtime = match self.policy.timer {
      TimerPolicy::None => None,
      TimerPolicy::Idle(_) | TimerPolicy::Delay(_) => Some(timer_runtime()?),
    };

    let batch = {
      let mut state = self.lock();
      if let Some(timer) = state.idle.take() {
        timer.cancel();
      }
      state.buffer.push(item);

      if self
        .policy
        .max_items
        .is_some_and(|max| state.buffer.len() >= max)
      {
        state.take_batch()
      } else {
        match (self.policy.timer, runtime) {
          (TimerPolicy::Idle(after), Some(runtime)) => {
            let timer = self.arm(&mut state, &runtime, Trigger::Idle, after);
            state.idle = Some(timer);
          }
          (TimerPolicy::Delay(after), Some(runtime)) if state.delay.is_none() => {
            let timer = self.arm(&mut state, &runtime, Trigger::Delay, after);
            state.delay = Some(timer);
          }
          _ => {}
        }
        None
      }
    };

    match batch {
      Some(items) => self.dispatch(items, Trigger::MaxItems),
      None => Ok(()),
    }
  }
}

impl<T> Pipe<Vec<T>> for BatchNode<T> {
  fn broadcast(&self) -> &Broadcast<Vec<T>> {
    &self.broadcast
  }
}

/// Returns the runtime timers are scheduled on.
fn timer_runtime() -> Result<Handle> {
  let runtime = Handle::try_current().map_err(|_| NodeError::NoRuntime)?;
  match runtime.runtime_flavor() {
    RuntimeFlavor::CurrentThread => Ok(runtime),
    _ => Err(NodeError::UnsupportedRuntime),
  }
}

/// Creates a batch node from `config`.
///
/// # Example
///
/// ```rust,no_run
/// use pipeweave::node::Pipe;
/// use pipeweave::nodes::{BatchConfig, batch, collect, source};
///
/// let head = source::<u32>();
/// let batches = head
///   .pipe(batch(BatchConfig::new().max_items(3))?)
///   .pipe(collect());
/// # Ok::<(), pipeweave::ConfigError>(())
/// ```
pub fn batch<T>(config: BatchConfig) -> Result<Arc<BatchNode<T>>, ConfigError>
where
  T: Clone + Send + 'static,
{
  BatchNode::new(config)
}
