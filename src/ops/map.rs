//! Map operator implementation
//!
//! Transforms every value emitted by the source Observable with a function.
//! `try_map` takes a fallible function and terminates the stream with the
//! first error it returns.

use crate::{
  observable::Observable,
  observer::Observer,
  subscription::{Disposable, Subscription},
};

#[derive(Clone)]
pub struct Map<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for Map<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + Send + 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<B, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(MapObserver { observer, func: self.func })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F, B> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> B,
{
  forward_observer!(on_subscribe, error, complete);

  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }
}

#[derive(Clone)]
pub struct TryMap<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for TryMap<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<B, S::Err> + Send + 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<B, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(TryMapObserver {
      observer,
      func: self.func,
      upstream: None,
      failed: false,
    })
  }
}

pub struct TryMapObserver<O, F> {
  observer: O,
  func: F,
  upstream: Option<Subscription>,
  failed: bool,
}

impl<Item, Err, O, F, B> Observer<Item, Err> for TryMapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Result<B, Err>,
{
  fn on_subscribe(&mut self, subscription: Subscription) {
    self.upstream = Some(subscription.clone());
    self.observer.on_subscribe(subscription);
  }

  fn next(&mut self, value: Item) {
    if self.failed {
      return;
    }
    match (self.func)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => {
        self.failed = true;
        self.observer.error(err);
        if let Some(upstream) = &self.upstream {
          upstream.dispose();
        }
      }
    }
  }

  fn error(&mut self, err: Err) {
    if !self.failed {
      self.observer.error(err)
    }
  }

  fn complete(&mut self) {
    if !self.failed {
      self.observer.complete()
    }
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[test]
  fn primitive_type() {
    let i = Arc::new(Mutex::new(0));
    let c_i = i.clone();
    observable::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(move |v| *c_i.lock().unwrap() = v);
    assert_eq!(*i.lock().unwrap(), 200);
  }

  #[test]
  fn map_types_mixed() {
    let seen = Arc::new(Mutex::new(vec![]));
    let c_seen = seen.clone();
    crate::just!(1, 2, 3)
      .map(|v| format!("#{v}"))
      .subscribe(move |v| c_seen.lock().unwrap().push(v));
    assert_eq!(*seen.lock().unwrap(), vec!["#1", "#2", "#3"]);
  }

  #[test]
  fn map_passes_error_through() {
    let errors = Arc::new(Mutex::new(vec![]));
    let c_errors = errors.clone();
    observable::throw::<i32, _>(RxError::msg("upstream"))
      .map(|v| v + 1)
      .subscribe_err(|_| {}, move |e| c_errors.lock().unwrap().push(e.to_string()));
    assert_eq!(*errors.lock().unwrap(), vec!["upstream"]);
  }

  #[test]
  fn try_map_failure_is_terminal() {
    let seen = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_seen, c_errors, c_completed) = (seen.clone(), errors.clone(), completed.clone());

    observable::from_iter(vec!["1", "2", "x", "4"])
      .try_map(|s| s.parse::<i32>().map_err(RxError::from_error))
      .subscribe_all(
        move |v| c_seen.lock().unwrap().push(v),
        move |e| c_errors.lock().unwrap().push(e.to_string()),
        move || *c_completed.lock().unwrap() = true,
      );

    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    assert_eq!(errors.lock().unwrap().len(), 1);
    assert!(!*completed.lock().unwrap());
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_map);

  fn bench_map(b: &mut Bencher) { b.iter(primitive_type); }
}
