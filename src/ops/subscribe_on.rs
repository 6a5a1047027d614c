use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::Scheduler,
  subscription::{Disposable, Subscription},
};

#[derive(Clone)]
pub struct SubscribeOn<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for SubscribeOn<S, SD>
where
  S: Observable + Send + 'static,
  SD: Scheduler,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    let source = self.source;
    let upstream = SubscribeOnObserver { observer, subscription: subscription.clone() };
    log::debug!("subscribe_on: handing the subscription to the scheduler");
    let handle = self.scheduler.schedule(move || {
      if !upstream.subscription.is_disposed() {
        source.actual_subscribe(upstream);
      }
    });
    subscription.add(handle);
    subscription
  }
}

/// Forwards every event unchanged; the source's own subscription handle is
/// folded into the one the downstream already holds.
pub struct SubscribeOnObserver<O> {
  observer: O,
  subscription: Subscription,
}

impl<Item, Err, O> Observer<Item, Err> for SubscribeOnObserver<O>
where
  O: Observer<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: Subscription) { self.subscription.add(subscription); }

  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
