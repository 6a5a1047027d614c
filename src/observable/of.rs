use std::marker::PhantomData;

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::{Disposable, Subscription},
};

/// Creates an observable emitting each argument once, in argument order,
/// then completing.
///
/// Every argument is a separate value: `just!(vec![1, 2])` emits one
/// `Vec`, not its elements.
///
/// # Examples
///
/// ```
/// use rxpush::prelude::*;
///
/// rxpush::just!(1, 2, 3).subscribe(|v| println!("{},", v));
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! just {
  ( $( $item:expr ),* $(,)? ) => {
    $crate::observable::from_iter([ $( $item ),* ])
  };
}

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// ```
/// use rxpush::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item> Observable for ObservableOf<Item> {
  type Item = Item;
  type Err = RxError;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Item, RxError> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    if !subscription.is_disposed() {
      observer.next(self.0);
    }
    if !subscription.is_disposed() {
      observer.complete();
    }
    subscription
  }
}

/// Creates an observable that completes immediately without emitting.
pub fn empty<Item>() -> ObservableEmpty<Item> { ObservableEmpty(PhantomData) }

pub struct ObservableEmpty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for ObservableEmpty<Item> {
  fn clone(&self) -> Self { ObservableEmpty(PhantomData) }
}

impl<Item> Observable for ObservableEmpty<Item> {
  type Item = Item;
  type Err = RxError;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Item, RxError> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    if !subscription.is_disposed() {
      observer.complete();
    }
    subscription
  }
}

/// Creates an observable that emits no items, just terminates with an error.
///
/// This is also how a `flat_map` projection reports a failure: return
/// `throw(err).box_it()` for that value.
pub fn throw<Item, Err>(err: Err) -> ObservableThrow<Item, Err> {
  ObservableThrow { err, _marker: PhantomData }
}

pub struct ObservableThrow<Item, Err> {
  err: Err,
  _marker: PhantomData<fn() -> Item>,
}

impl<Item, Err: Clone> Clone for ObservableThrow<Item, Err> {
  fn clone(&self) -> Self { ObservableThrow { err: self.err.clone(), _marker: PhantomData } }
}

impl<Item, Err> Observable for ObservableThrow<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    if !subscription.is_disposed() {
      observer.error(self.err);
    }
    subscription
  }
}
