use std::marker::PhantomData;

use crate::{
  observable::Observable,
  observer::{BoxObserver, Observer},
  subscription::{Disposable, Subscription},
};

/// Creates an observable from a producer function.
///
/// The producer receives an [`ObservableEmitter`] and decides what, when and
/// whether to emit. The emitter may be moved to another thread; long-running
/// producers should check [`ObservableEmitter::is_disposed`] between
/// emissions to stop early once the subscriber is gone.
///
/// # Examples
///
/// ```
/// use rxpush::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// observable::create(|mut emitter: ObservableEmitter<i32, RxError>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(move |v| c_seen.lock().unwrap().push(v));
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub fn create<F, Item, Err>(producer: F) -> Create<F, Item, Err>
where
  F: FnOnce(ObservableEmitter<Item, Err>),
{
  Create { producer, _marker: PhantomData }
}

pub struct Create<F, Item, Err> {
  producer: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { producer: self.producer.clone(), _marker: PhantomData } }
}

impl<F, Item, Err> Observable for Create<F, Item, Err>
where
  F: FnOnce(ObservableEmitter<Item, Err>),
  Item: 'static,
  Err: 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    (self.producer)(ObservableEmitter {
      observer: Box::new(observer),
      subscription: subscription.clone(),
      stopped: false,
    });
    subscription
  }
}

/// The producer side of a [`create`] subscription.
///
/// Calls after a terminal signal, or after the subscription was disposed,
/// are ignored.
pub struct ObservableEmitter<Item, Err> {
  observer: BoxObserver<Item, Err>,
  subscription: Subscription,
  stopped: bool,
}

impl<Item, Err> ObservableEmitter<Item, Err> {
  pub fn next(&mut self, value: Item) {
    if !self.is_disposed() {
      self.observer.next(value);
    }
  }

  pub fn error(&mut self, err: Err) {
    if !self.is_disposed() {
      self.stopped = true;
      self.observer.error(err);
      self.subscription.dispose();
    }
  }

  pub fn complete(&mut self) {
    if !self.is_disposed() {
      self.stopped = true;
      self.observer.complete();
      self.subscription.dispose();
    }
  }

  /// The cancellation check: `true` once the subscriber disposed its handle
  /// or a terminal signal was sent.
  pub fn is_disposed(&self) -> bool { self.stopped || self.subscription.is_disposed() }

  /// Registers a resource the producer holds, released when the
  /// subscription is disposed.
  pub fn add_teardown<D>(&self, teardown: D)
  where
    D: Disposable + Send + Sync + 'static,
  {
    self.subscription.add(teardown);
  }
}
