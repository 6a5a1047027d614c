//! Buffer operator implementation
//!
//! Collects the source's values into `Vec`s of `count` items. A partial
//! buffer is flushed on completion and dropped on error.

use crate::{observable::Observable, observer::Observer, subscription::Subscription};

#[derive(Clone)]
pub struct Buffer<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S> Observable for Buffer<S>
where
  S: Observable,
  S::Item: Send + 'static,
{
  type Item = Vec<S::Item>;
  type Err = S::Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<Vec<S::Item>, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(BufferObserver {
      observer,
      buffer: Vec::with_capacity(self.count),
      count: self.count,
    })
  }
}

pub struct BufferObserver<O, Item> {
  observer: O,
  buffer: Vec<Item>,
  count: usize,
}

impl<O, Item, Err> Observer<Item, Err> for BufferObserver<O, Item>
where
  O: Observer<Vec<Item>, Err>,
{
  forward_observer!(on_subscribe);

  fn next(&mut self, value: Item) {
    self.buffer.push(value);

    if self.buffer.len() >= self.count {
      let buffer = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.count));
      self.observer.next(buffer);
    }
  }

  fn error(&mut self, err: Err) {
    self.buffer.clear();
    self.observer.error(err)
  }

  fn complete(&mut self) {
    if !self.buffer.is_empty() {
      let buffer = std::mem::take(&mut self.buffer);
      self.observer.next(buffer);
    }

    self.observer.complete();
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn it_shall_emit_buffered_items() {
    let expected = vec![vec![0, 1], vec![2, 3], vec![4]];
    let actual = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_actual, c_completed) = (actual.clone(), completed.clone());

    observable::from_iter(0..5).buffer(2).subscribe_all(
      move |vec| c_actual.lock().unwrap().push(vec),
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );

    assert_eq!(*actual.lock().unwrap(), expected);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn exact_multiple_has_no_empty_tail() {
    let actual = Arc::new(Mutex::new(vec![]));
    let c_actual = actual.clone();
    observable::range(1, 6).buffer(3).subscribe(move |vec| c_actual.lock().unwrap().push(vec));
    assert_eq!(*actual.lock().unwrap(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
  }

  #[test]
  fn it_shall_not_emit_partial_buffer_on_error() {
    let actual = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(0));
    let (c_actual, c_errors) = (actual.clone(), errors.clone());

    observable::create(|mut emitter: ObservableEmitter<i32, RxError>| {
      emitter.next(0);
      emitter.next(1);
      emitter.next(2);
      emitter.error(RxError::msg("stop"));
    })
    .buffer(2)
    .subscribe_err(
      move |vec| c_actual.lock().unwrap().push(vec),
      move |_| *c_errors.lock().unwrap() += 1,
    );

    assert_eq!(*actual.lock().unwrap(), vec![vec![0, 1]]);
    assert_eq!(*errors.lock().unwrap(), 1);
  }

  #[test]
  #[should_panic(expected = "buffer size must be greater than zero")]
  fn zero_size_panics() { let _ = observable::from_iter(0..5).buffer(0); }
}
