use std::collections::VecDeque;

use crate::{
  observable::Observable,
  observer::{Notification, Observer},
  rc::MutArc,
  scheduler::Scheduler,
  subscription::{Disposable, Subscription},
};

#[derive(Clone)]
pub struct ObserveOn<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for ObserveOn<S, SD>
where
  S: Observable,
  S::Item: Send + 'static,
  S::Err: Send + 'static,
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
    self.source.actual_subscribe(ObserveOnObserver {
      observer: MutArc::own(observer),
      queue: MutArc::own(Pending { events: VecDeque::new(), draining: false }),
      scheduler: self.scheduler,
      subscription: subscription.clone(),
    });
    subscription
  }
}

/// Events waiting for delivery. At most one drain task exists at a time, so
/// events reach the observer in the order the source produced them even on
/// a multi-threaded scheduler.
struct Pending<Item, Err> {
  events: VecDeque<Notification<Item, Err>>,
  draining: bool,
}

pub struct ObserveOnObserver<O, SD, Item, Err> {
  observer: MutArc<O>,
  queue: MutArc<Pending<Item, Err>>,
  scheduler: SD,
  subscription: Subscription,
}

impl<O, SD, Item, Err> ObserveOnObserver<O, SD, Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
  Err: Send + 'static,
{
  fn push(&self, event: Notification<Item, Err>) {
    if self.subscription.is_disposed() {
      return;
    }
    {
      let mut queue = self.queue.rc_deref_mut();
      queue.events.push_back(event);
      if queue.draining {
        return;
      }
      queue.draining = true;
    }
    let observer = self.observer.clone();
    let queue = self.queue.clone();
    let subscription = self.subscription.clone();
    self.scheduler.schedule(move || drain(&observer, &queue, &subscription));
  }
}

fn drain<O, Item, Err>(
  observer: &MutArc<O>,
  queue: &MutArc<Pending<Item, Err>>,
  subscription: &Subscription,
) where
  O: Observer<Item, Err>,
{
  loop {
    let event = {
      let mut queue = queue.rc_deref_mut();
      if subscription.is_disposed() {
        queue.events.clear();
      }
      match queue.events.pop_front() {
        Some(event) => event,
        None => {
          queue.draining = false;
          return;
        }
      }
    };
    event.accept(&mut *observer.rc_deref_mut());
  }
}

impl<O, SD, Item, Err> Observer<Item, Err> for ObserveOnObserver<O, SD, Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
  Err: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: Subscription) { self.subscription.add(subscription); }

  fn next(&mut self, value: Item) { self.push(Notification::Next(value)) }

  fn error(&mut self, err: Err) { self.push(Notification::Error(err)) }

  fn complete(&mut self) { self.push(Notification::Complete) }
}
