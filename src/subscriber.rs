use crate::{
  observer::Observer,
  subscription::{Disposable, Subscription},
};

/// Wraps the final observer of a chain and enforces the observer contract on
/// its behalf.
///
/// `on_subscribe` reaches the inner observer once. Nothing reaches it after a
/// terminal signal or after its subscription was disposed. A terminal signal
/// disposes the subscription so upstream resources are released.
pub struct Subscriber<O> {
  observer: O,
  subscription: Option<Subscription>,
  stopped: bool,
}

impl<O> Subscriber<O> {
  pub fn new(observer: O) -> Self { Subscriber { observer, subscription: None, stopped: false } }

  pub fn is_stopped(&self) -> bool {
    self.stopped || self.subscription.as_ref().is_some_and(Disposable::is_disposed)
  }

  fn dispose_upstream(&self) {
    if let Some(subscription) = &self.subscription {
      subscription.dispose();
    }
  }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: Subscription) {
    if self.subscription.is_some() {
      // A second handle means a misbehaving source; it must not run on.
      subscription.dispose();
      return;
    }
    self.subscription = Some(subscription.clone());
    self.observer.on_subscribe(subscription);
  }

  fn next(&mut self, value: Item) {
    if !self.is_stopped() {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if !self.is_stopped() {
      self.stopped = true;
      self.observer.error(err);
      self.dispose_upstream();
    }
  }

  fn complete(&mut self) {
    if !self.is_stopped() {
      self.stopped = true;
      self.observer.complete();
      self.dispose_upstream();
    }
  }
}
