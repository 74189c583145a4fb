//! # Batch Configuration
//!
//! Options recognised by [`BatchNode`](crate::nodes::BatchNode):
//!
//! | option         | effect                                                        |
//! |----------------|---------------------------------------------------------------|
//! | `maxItems`     | flush as soon as the buffer holds at least this many items    |
//! | `idleTimeout`  | flush once no input has arrived for this long                 |
//! | `delayTimeout` | flush this long after the first input that found the buffer empty |
//!
//! `idleTimeout` and `delayTimeout` exclude each other; `maxItems` combines
//! with either. With no option at all the node behaves as `idleTimeout = 0`,
//! collecting everything fed within one scheduler tick.
//!
//! Timeouts are [`Duration`]s in code and milliseconds when (de)serialized:
//!
//! ```rust
//! use pipeweave::nodes::BatchConfig;
//! use std::time::Duration;
//!
//! let config: BatchConfig = serde_json::from_str(r#"{ "maxItems": 100, "delayTimeout": 250 }"#)?;
//! assert_eq!(config, BatchConfig::new().max_items(100).delay_timeout(Duration::from_millis(250)));
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-facing batching options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BatchConfig {
  /// Flush once the buffer length reaches this count.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_items: Option<usize>,
  /// Flush this long after the most recent input.
  #[serde(with = "millis", skip_serializing_if = "Option::is_none")]
  pub idle_timeout: Option<Duration>,
  /// Flush this long after the first input following an empty buffer.
  #[serde(with = "millis", skip_serializing_if = "Option::is_none")]
  pub delay_timeout: Option<Duration>,
}

impl BatchConfig {
  /// Creates a configuration with no options set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the item count that triggers an immediate flush.
  pub fn max_items(mut self, max_items: usize) -> Self {
    self.max_items = Some(max_items);
    self
  }

  /// Sets the idle timeout.
  pub fn idle_timeout(mut self, timeout: Duration) -> Self {
    self.idle_timeout = Some(timeout);
    self
  }

  /// Sets the delay timeout.
  pub fn delay_timeout(mut self, timeout: Duration) -> Self {
    self.delay_timeout = Some(timeout);
    self
  }

  /// Validates the options and resolves the effective policy.
  pub(crate) fn policy(&self) -> Result<BatchPolicy, ConfigError> {
    if self.max_items == Some(0) {
      return Err(ConfigError::ZeroMaxItems);
    }
    let timer = match (self.idle_timeout, self.delay_timeout) {
      (Some(_), Some(_)) => return Err(ConfigError::IdleAndDelay),
      (Some(after), None) => TimerPolicy::Idle(after),
      (None, Some(after)) => TimerPolicy::Delay(after),
      (None, None) if self.max_items.is_none() => TimerPolicy::Idle(Duration::ZERO),
      (None, None) => TimerPolicy::None,
    };
    Ok(BatchPolicy {
      max_items: self.max_items,
      timer,
    })
  }
}

/// Validated batching behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchPolicy {
  pub(crate) max_items: Option<usize>,
  pub(crate) timer: TimerPolicy,
}

/// Which timer, if any, drives time-based flushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerPolicy {
  None,
  Idle(Duration),
  Delay(Duration),
}

/// Serde adapter storing `Option<Duration>` as whole milliseconds.
mod millis {
  use serde::{Deserialize, Deserializer, Serialize, Serializer};
  use std::time::Duration;

  pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    value
      .map(|timeout| u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
      .serialize(serializer)
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
  }
}
