use crate::{
  observable::Observable,
  observer::{BoxObserver, Observer},
  subscription::Subscription,
};

/// Object-safe face of [`Observable`], subscribed through a boxed observer.
trait DynObservable<Item, Err>: Send {
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<Item, Err>) -> Subscription;
}

impl<T> DynObservable<T::Item, T::Err> for T
where
  T: Observable + Send,
  T::Item: 'static,
  T::Err: 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<T::Item, T::Err>) -> Subscription {
    (*self).actual_subscribe(observer)
  }
}

/// A type-erased observable, created by `box_it`. Lets differently typed
/// sources with the same `Item` and `Err` be stored or returned together.
///
/// ```
/// use rxpush::prelude::*;
///
/// let sources: Vec<BoxObservable<i32, RxError>> = vec![
///   observable::of(1).box_it(),
///   observable::range(2, 3).map(|v| v as i32).box_it(),
/// ];
/// for source in sources {
///   source.subscribe(|v| println!("{v}"));
/// }
/// ```
pub struct BoxObservable<Item, Err>(Box<dyn DynObservable<Item, Err>>);

impl<Item: 'static, Err: 'static> BoxObservable<Item, Err> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item, Err = Err> + Send + 'static,
  {
    BoxObservable(Box::new(source))
  }
}

impl<Item, Err> Observable for BoxObservable<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    self.0.box_subscribe(Box::new(observer))
  }
}
