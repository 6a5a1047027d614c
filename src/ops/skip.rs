//! Skip operator implementation
//!
//! Ignores the first `count` values emitted by the source Observable, then
//! emits the rest.

use crate::{observable::Observable, observer::Observer, subscription::Subscription};

/// Skip operator: Ignores the first `count` values from the source observable
///
/// If the source completes before emitting `count` values, `skip` completes
/// without emitting any values.
///
/// # Examples
///
/// ```
/// use rxpush::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let result = Arc::new(Mutex::new(Vec::new()));
/// let c_result = result.clone();
/// observable::from_iter([1, 2, 3, 4, 5])
///   .skip(2)
///   .subscribe(move |v| c_result.lock().unwrap().push(v));
/// assert_eq!(*result.lock().unwrap(), vec![3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct Skip<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S: Observable> Observable for Skip<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(SkipObserver { observer, remaining: self.count })
  }
}

pub struct SkipObserver<O> {
  observer: O,
  remaining: usize,
}

impl<O, Item, Err> Observer<Item, Err> for SkipObserver<O>
where
  O: Observer<Item, Err>,
{
  forward_observer!(on_subscribe, error, complete);

  fn next(&mut self, v: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
    } else {
      self.observer.next(v);
    }
  }
}
