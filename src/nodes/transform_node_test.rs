use super::{collect, filter, for_each, map, source, transform, transform_async};
use crate::error::NodeError;
use crate::node::{Node, Pipe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn test_zero_emissions_drop_the_input() {
  let head = source::<i32>();
  let sink = head
    .pipe(transform::<i32, i32, _>(|_, _| Ok(())))
    .pipe(collect());

  head.input(1).unwrap();
  head.input(2).unwrap();

  assert!(sink.is_empty());
}

#[test]
fn test_multiple_emissions_spread_one_input() {
  let head = source::<&'static str>();
  let sink = head
    .pipe(transform::<_, String, _>(|line: &'static str, emit| {
      for word in line.split(' ') {
        emit.emit(word.to_string())?;
      }
      Ok(())
    }))
    .pipe(collect());

  head.input("push based streams").unwrap();

  assert_eq!(sink.items(), vec!["push", "based", "streams"]);
}

#[test]
fn test_pipe_returns_the_piped_node() {
  let head = source::<i32>();
  let doubled = map(|n: i32| n * 2);
  let returned = head.pipe(doubled.clone());

  assert!(Arc::ptr_eq(&doubled, &returned));
}

#[test]
fn test_synchronous_chain_completes_before_input_returns() {
  let head = source::<i32>();
  let sink = head
    .pipe(filter(|n: &i32| n % 7 != 0))
    .pipe(map(|n: i32| n * 2))
    .pipe(collect());

  for n in 0..=7 {
    head.input(n).unwrap();
    assert_eq!(sink.len(), n.clamp(0, 6) as usize);
  }
  assert_eq!(sink.items(), vec![2, 4, 6, 8, 10, 12]);
}

#[test]
fn test_delivery_is_depth_first() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let head = source::<i32>();

  let first_log = log.clone();
  let first = head.pipe(for_each(move |n: &i32| first_log.lock().unwrap().push(format!("a{n}"))));
  let nested_log = log.clone();
  first.pipe(for_each(move |n: &i32| nested_log.lock().unwrap().push(format!("a.1:{n}"))));
  let second_log = log.clone();
  head.pipe(for_each(move |n: &i32| second_log.lock().unwrap().push(format!("b{n}"))));

  head.input(1).unwrap();

  assert_eq!(*log.lock().unwrap(), vec!["a1", "a.1:1", "b1"]);
}

#[test]
fn test_user_error_aborts_fan_out_partway() {
  let head = source::<i32>();
  let before = head.pipe(collect());
  head.pipe(transform::<i32, i32, _>(|n, _| {
    Err(NodeError::failed(format!("rejected {n}")))
  }));
  let after = head.pipe(collect());

  let error = head.input(5).unwrap_err();

  assert!(matches!(error, NodeError::Failed(ref message) if message == "rejected 5"));
  assert_eq!(before.items(), vec![5]);
  assert!(after.is_empty());
}

#[test]
fn test_async_transform_requires_runtime() {
  let node = transform_async::<i32, i32, _, _>(|n, emit| async move { emit.emit(n) });

  assert!(matches!(node.input(1), Err(NodeError::NoRuntime)));
}

#[tokio::test(start_paused = true)]
async fn test_async_transform_emits_after_suspension() {
  let head = source::<u64>();
  let sink = head
    .pipe(transform_async::<u64, u64, _, _>(|n, emit| async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      emit.emit(n + 1)?;
      emit.emit(n + 2)
    }))
    .pipe(collect());

  head.input(0).unwrap();
  assert!(sink.is_empty());

  tokio::time::sleep(Duration::from_millis(20)).await;
  assert_eq!(sink.items(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_async_transform_does_not_serialize_inputs() {
  let head = source::<u64>();
  let sink = head
    .pipe(transform_async::<u64, u64, _, _>(|delay, emit| async move {
      tokio::time::sleep(Duration::from_millis(delay)).await;
      emit.emit(delay)
    }))
    .pipe(collect());

  for delay in [30, 20, 10] {
    head.input(delay).unwrap();
  }
  tokio::time::sleep(Duration::from_millis(50)).await;

  // Outputs follow completion order, not input order.
  assert_eq!(sink.items(), vec![10, 20, 30]);
}

#[tokio::test(start_paused = true)]
async fn test_async_error_is_not_returned_to_caller() {
  let head = source::<i32>();
  let sink = head
    .pipe(transform_async::<i32, i32, _, _>(|n, emit| async move {
      if n < 0 {
        return Err(NodeError::failed("negative"));
      }
      emit.emit(n)
    }))
    .pipe(collect());

  assert!(head.input(-1).is_ok());
  assert!(head.input(3).is_ok());
  tokio::time::sleep(Duration::from_millis(1)).await;

  assert_eq!(sink.items(), vec![3]);
}
