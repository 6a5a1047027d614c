//! Observable trait and the extension methods shared by every stream
//!
//! An [`Observable`] is a cold description of a value sequence: nothing is
//! produced until `actual_subscribe` is called, and every subscription runs
//! the producer anew. [`ObservableExt`] is implemented for every observable
//! and carries the `subscribe` family plus all operators.

use std::fmt::Debug;

use crate::{
  observer::{Observer, ObserverAll, ObserverNext},
  ops::{
    box_it::BoxObservable,
    buffer::Buffer,
    distinct::Distinct,
    filter::{Filter, TryFilter},
    flat_map::FlatMap,
    map::{Map, TryMap},
    observe_on::ObserveOn,
    skip::Skip,
    subscribe_on::SubscribeOn,
  },
  scheduler::Scheduler,
  subscriber::Subscriber,
  subscription::Subscription,
};

mod create;
pub use create::*;
mod from_iter;
pub use from_iter::*;
mod of;
pub use of::*;

/// A push-based source of `Item` values that may end with an `Err`.
pub trait Observable: Sized {
  type Item;
  type Err;

  /// Connects `observer` to this source.
  ///
  /// The source calls `observer.on_subscribe` before any other callback and
  /// returns the same subscription handle it passed there. Prefer the
  /// `subscribe*` methods of [`ObservableExt`], which also guard the
  /// observer against contract violations.
  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static;
}

pub trait ObservableExt: Observable {
  /// Subscribes with a `next` callback only. An error reaching this
  /// subscriber is logged and dropped.
  fn subscribe<N>(self, next: N) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
    Self::Err: Debug,
  {
    self.actual_subscribe(Subscriber::new(ObserverNext(next)))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnMut(Self::Err) + Send + 'static,
  {
    self.actual_subscribe(Subscriber::new(ObserverAll::new(next, error, || {})))
  }

  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnMut(Self::Err) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.actual_subscribe(Subscriber::new(ObserverAll::new(next, error, complete)))
  }

  /// Subscribes a full observer, including its `on_subscribe` callback.
  fn subscribe_with<O>(self, observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    self.actual_subscribe(Subscriber::new(observer))
  }

  /// Transforms each value with `f`. Errors and completion pass through.
  fn map<B, F>(self, f: F) -> Map<Self, F>
  where
    F: FnMut(Self::Item) -> B,
  {
    Map { source: self, func: f }
  }

  /// Like [`ObservableExt::map`], but `f` may fail. The first failure is
  /// sent downstream as the terminal error and the source is disposed.
  fn try_map<B, F>(self, f: F) -> TryMap<Self, F>
  where
    F: FnMut(Self::Item) -> Result<B, Self::Err>,
  {
    TryMap { source: self, func: f }
  }

  /// Emits only the values for which `predicate` returns `true`.
  fn filter<F>(self, predicate: F) -> Filter<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    Filter { source: self, predicate }
  }

  fn try_filter<F>(self, predicate: F) -> TryFilter<Self, F>
  where
    F: FnMut(&Self::Item) -> Result<bool, Self::Err>,
  {
    TryFilter { source: self, predicate }
  }

  /// Maps each value to an inner observable and merges every inner stream
  /// into the output, in the order the values arrive.
  ///
  /// The output completes once the source and all inner streams completed.
  /// The first error from any of them ends the output and disposes the rest.
  fn flat_map<Inner, F>(self, f: F) -> FlatMap<Self, F>
  where
    F: FnMut(Self::Item) -> Inner,
    Inner: Observable<Err = Self::Err>,
  {
    FlatMap { source: self, func: f }
  }

  /// Emits each value the first time it is seen, remembering every emitted
  /// value for the lifetime of the subscription.
  fn distinct(self) -> Distinct<Self>
  where
    Self::Item: Eq + std::hash::Hash + Clone,
  {
    Distinct { source: self }
  }

  /// Drops the first `count` values.
  fn skip(self, count: usize) -> Skip<Self> { Skip { source: self, count } }

  /// Groups values into vectors of `count`, flushing a shorter final group
  /// on completion. An error discards the partial group.
  ///
  /// # Panics
  ///
  /// Panics if `count` is 0.
  fn buffer(self, count: usize) -> Buffer<Self> {
    assert!(count > 0, "buffer size must be greater than zero");
    Buffer { source: self, count }
  }

  /// Runs the subscription, and therefore the producer, on `scheduler`.
  ///
  /// Only the first hop matters: the `subscribe_on` nearest the source
  /// decides where production runs.
  fn subscribe_on<S: Scheduler>(self, scheduler: S) -> SubscribeOn<Self, S> {
    SubscribeOn { source: self, scheduler }
  }

  /// Delivers every downstream callback on `scheduler`, keeping the order in
  /// which the source produced them.
  fn observe_on<S: Scheduler>(self, scheduler: S) -> ObserveOn<Self, S> {
    ObserveOn { source: self, scheduler }
  }

  /// Erases the concrete type of this observable.
  fn box_it(self) -> BoxObservable<Self::Item, Self::Err>
  where
    Self: Send + 'static,
    Self::Item: 'static,
    Self::Err: 'static,
  {
    BoxObservable::new(self)
  }
}

impl<T: Observable> ObservableExt for T {}
