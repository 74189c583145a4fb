use super::{Broadcast, Emitter};
use crate::error::{NodeError, Result};
use crate::node::Node;
use std::sync::{Arc, Mutex};

/// Appends `"<label>:<item>"` to a shared log.
struct Recorder {
  label: &'static str,
  log: Arc<Mutex<Vec<String>>>,
}

impl Node<u32> for Recorder {
  fn input(&self, item: u32) -> Result<()> {
    self.log.lock().unwrap().push(format!("{}:{}", self.label, item));
    Ok(())
  }
}

struct Failing;

impl Node<u32> for Failing {
  fn input(&self, item: u32) -> Result<()> {
    Err(NodeError::failed(format!("refused {item}")))
  }
}

fn recorder(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Recorder> {
  Arc::new(Recorder {
    label,
    log: log.clone(),
  })
}

#[test]
fn test_emit_without_recipients() {
  let broadcast = Broadcast::<u32>::new();
  assert!(broadcast.is_empty());
  assert!(broadcast.emit(1).is_ok());
}

#[test]
fn test_recipients_notified_in_registration_order() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let broadcast = Broadcast::<u32>::new();
  broadcast.connect(recorder("b", &log));
  broadcast.connect(recorder("a", &log));
  broadcast.connect(recorder("c", &log));

  broadcast.emit(1).unwrap();
  broadcast.emit(2).unwrap();

  assert_eq!(
    *log.lock().unwrap(),
    vec!["b:1", "a:1", "c:1", "b:2", "a:2", "c:2"]
  );
  assert_eq!(broadcast.len(), 3);
}

#[test]
fn test_duplicate_registration_duplicates_delivery() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let broadcast = Broadcast::<u32>::new();
  let twice = recorder("x", &log);
  broadcast.connect(twice.clone());
  broadcast.connect(twice);

  broadcast.emit(7).unwrap();

  assert_eq!(*log.lock().unwrap(), vec!["x:7", "x:7"]);
}

#[test]
fn test_failing_recipient_stops_emission() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let broadcast = Broadcast::<u32>::new();
  broadcast.connect(recorder("before", &log));
  broadcast.connect(Arc::new(Failing));
  broadcast.connect(recorder("after", &log));

  let error = broadcast.emit(3).unwrap_err();

  assert_eq!(error.to_string(), "node function failed: refused 3");
  assert_eq!(*log.lock().unwrap(), vec!["before:3"]);
}

/// Pipes a new recorder onto its own broadcast the first time it runs.
struct Grower {
  broadcast: Arc<Broadcast<u32>>,
  log: Arc<Mutex<Vec<String>>>,
}

impl Node<u32> for Grower {
  fn input(&self, _: u32) -> Result<()> {
    if self.broadcast.len() == 1 {
      self.broadcast.connect(recorder("late", &self.log));
    }
    Ok(())
  }
}

#[test]
fn test_recipient_added_during_emission_sees_next_item() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let broadcast = Arc::new(Broadcast::<u32>::new());
  broadcast.connect(Arc::new(Grower {
    broadcast: broadcast.clone(),
    log: log.clone(),
  }));

  broadcast.emit(1).unwrap();
  assert!(log.lock().unwrap().is_empty());

  broadcast.emit(2).unwrap();
  assert_eq!(*log.lock().unwrap(), vec!["late:2"]);
}

#[test]
fn test_emitter_outlives_call() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let broadcast = Arc::new(Broadcast::<u32>::new());
  broadcast.connect(recorder("r", &log));

  let emit = Emitter::new(broadcast.clone());
  let kept = emit.clone();
  drop(emit);
  kept.emit(9).unwrap();

  assert_eq!(*log.lock().unwrap(), vec!["r:9"]);
}
