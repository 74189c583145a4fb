use super::BatchConfig;
use super::batch_config::{BatchPolicy, TimerPolicy};
use crate::error::ConfigError;
use std::time::Duration;

#[test]
fn test_empty_config_defaults_to_zero_idle() {
  assert_eq!(
    BatchConfig::new().policy(),
    Ok(BatchPolicy {
      max_items: None,
      timer: TimerPolicy::Idle(Duration::ZERO),
    })
  );
}

#[test]
fn test_max_items_alone_arms_no_timer() {
  assert_eq!(
    BatchConfig::new().max_items(5).policy(),
    Ok(BatchPolicy {
      max_items: Some(5),
      timer: TimerPolicy::None,
    })
  );
}

#[test]
fn test_max_items_combines_with_delay() {
  let policy = BatchConfig::new()
    .max_items(5)
    .delay_timeout(Duration::from_millis(20))
    .policy()
    .unwrap();

  assert_eq!(policy.timer, TimerPolicy::Delay(Duration::from_millis(20)));
}

#[test]
fn test_both_timeouts_rejected() {
  let config = BatchConfig::new()
    .idle_timeout(Duration::ZERO)
    .delay_timeout(Duration::from_millis(1));

  assert_eq!(config.policy(), Err(ConfigError::IdleAndDelay));
}

#[test]
fn test_serialize_empty_config() {
  let json = serde_json::to_value(BatchConfig::new()).unwrap();
  assert_eq!(json, serde_json::json!({}));
}

#[test]
fn test_deserialize_camel_case_millis() {
  let config: BatchConfig =
    serde_json::from_str(r#"{ "maxItems": 3, "idleTimeout": 1500 }"#).unwrap();

  assert_eq!(config.max_items, Some(3));
  assert_eq!(config.idle_timeout, Some(Duration::from_millis(1500)));
  assert_eq!(config.delay_timeout, None);
}

#[test]
fn test_deserialize_missing_fields() {
  let config: BatchConfig = serde_json::from_str("{}").unwrap();
  assert_eq!(config, BatchConfig::new());
}

#[test]
fn test_deserialize_rejects_unknown_options() {
  assert!(serde_json::from_str::<BatchConfig>(r#"{ "maxItem": 3 }"#).is_err());
}

#[test]
fn test_serialize_skips_unset_timeouts() {
  let json = serde_json::to_value(BatchConfig::new().delay_timeout(Duration::from_millis(40)))
    .unwrap();

  assert_eq!(
    json,
    serde_json::json!({ "delayTimeout": 40 })
  );
}
