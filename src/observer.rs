//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides four methods: `on_subscribe` (receives the cancellation
//! handle), `next` (for values), `error` and `complete` (the two terminal
//! signals).

use std::fmt::Debug;

use crate::subscription::Subscription;

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives, in order: exactly one `on_subscribe`, any number of
/// `next`, and at most one of `error` or `complete`. Nothing is delivered
/// after a terminal signal, and callbacks for one subscription never
/// overlap.
pub trait Observer<Item, Err> {
  /// Receives the handle that cancels this subscription. Always the first
  /// call, made exactly once.
  fn on_subscribe(&mut self, subscription: Subscription);

  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable. Terminal.
  fn error(&mut self, err: Err);

  /// Handle completion of the observable. Terminal.
  fn complete(&mut self);
}

/// Boxed observer, used wherever observers of different concrete types are
/// stored side by side (subjects, `create` emitters, boxed observables).
pub type BoxObserver<Item, Err> = Box<dyn Observer<Item, Err> + Send>;

impl<Item, Err, T> Observer<Item, Err> for Box<T>
where
  T: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn on_subscribe(&mut self, subscription: Subscription) { (**self).on_subscribe(subscription) }

  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

/// One event of a stream, materialized. Used to queue events across a
/// scheduler hop and to record streams in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Notification<Item, Err> {
  /// Replays this event into `observer`.
  pub fn accept<O>(self, observer: &mut O)
  where
    O: Observer<Item, Err> + ?Sized,
  {
    match self {
      Notification::Next(v) => observer.next(v),
      Notification::Error(e) => observer.error(e),
      Notification::Complete => observer.complete(),
    }
  }

  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Notification::Next(_)) }
}

// ============================================================================
// Closure observers
// ============================================================================

/// Observer built from three closures, produced by `subscribe_all`.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline]
  fn on_subscribe(&mut self, _: Subscription) {}

  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }
}

/// Observer built from a single `next` closure, produced by `subscribe`.
///
/// An error reaching it has nowhere to go; it is logged and dropped.
#[derive(Clone)]
pub struct ObserverNext<N>(pub N);

impl<Item, Err, N> Observer<Item, Err> for ObserverNext<N>
where
  N: FnMut(Item),
  Err: Debug,
{
  #[inline]
  fn on_subscribe(&mut self, _: Subscription) {}

  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value) }

  fn error(&mut self, err: Err) {
    log::warn!("error dropped, the subscriber registered no error handler: {:?}", err);
  }

  #[inline]
  fn complete(&mut self) {}
}

#[cfg(test)]
mod test {
  use super::*;

  struct TestObserver {
    values: Vec<i32>,
    completed: bool,
  }

  impl Observer<i32, ()> for TestObserver {
    fn on_subscribe(&mut self, _: Subscription) {}

    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(&mut self, _: ()) {}

    fn complete(&mut self) { self.completed = true; }
  }

  #[test]
  fn boxed_observer_forwards() {
    let mut obs: Box<TestObserver> = Box::new(TestObserver { values: vec![], completed: false });
    Observer::<i32, ()>::next(&mut obs, 1);
    Observer::<i32, ()>::next(&mut obs, 2);
    Observer::<i32, ()>::complete(&mut obs);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(obs.completed);
  }

  #[test]
  fn closure_as_observer() {
    let mut count = 0;
    let mut done = false;
    {
      let mut closure_obs = ObserverAll::new(|v: i32| count += v, |_: ()| {}, || done = true);
      Observer::<i32, ()>::next(&mut closure_obs, 10);
      Observer::<i32, ()>::next(&mut closure_obs, 20);
      Observer::<i32, ()>::complete(&mut closure_obs);
    }
    assert_eq!(count, 30);
    assert!(done);
  }

  #[test]
  fn notification_replay() {
    let mut obs = TestObserver { values: vec![], completed: false };
    let events: Vec<Notification<i32, ()>> =
      vec![Notification::Next(1), Notification::Next(2), Notification::Complete];
    assert!(events[2].is_terminal());
    for n in events {
      n.accept(&mut obs);
    }
    assert_eq!(obs.values, vec![1, 2]);
    assert!(obs.completed);
  }
}
