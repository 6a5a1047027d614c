use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::{Disposable, Subscription},
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Disposal is checked before every element, so an unbounded iterator stops
/// once the subscriber is gone.
///
/// # Examples
///
/// ```
/// use rxpush::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Iter> Observable for ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  type Item = Iter::Item;
  type Err = RxError;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    for v in self.0 {
      if subscription.is_disposed() {
        return subscription;
      }
      observer.next(v);
    }
    if !subscription.is_disposed() {
      observer.complete();
    }
    subscription
  }
}

/// Emits `count` consecutive integers starting at `start`, then completes.
///
/// The sequence stops early at `i64::MAX` instead of overflowing.
///
/// ```
/// use rxpush::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// observable::range(-1, 3).subscribe(move |v| c_seen.lock().unwrap().push(v));
/// assert_eq!(*seen.lock().unwrap(), vec![-1, 0, 1]);
/// ```
pub fn range(start: i64, count: usize) -> ObservableIter<std::ops::Range<i64>> {
  let count = i64::try_from(count).unwrap_or(i64::MAX);
  from_iter(start..start.saturating_add(count))
}
