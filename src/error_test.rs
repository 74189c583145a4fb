use crate::error::{ConfigError, NodeError};
use std::error::Error;

#[test]
fn test_messages_become_failures() {
  assert!(matches!(NodeError::from("boom"), NodeError::Failed(ref m) if m == "boom"));
  assert!(matches!(NodeError::from(String::from("bang")), NodeError::Failed(ref m) if m == "bang"));
}

#[test]
fn test_foreign_errors_are_transparent() {
  let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
  let error = NodeError::from(Box::new(io) as Box<dyn Error + Send + Sync>);

  assert_eq!(error.to_string(), "pipe closed");
}

#[test]
fn test_config_error_display() {
  assert_eq!(
    ConfigError::IdleAndDelay.to_string(),
    "idleTimeout and delayTimeout are mutually exclusive"
  );
}
