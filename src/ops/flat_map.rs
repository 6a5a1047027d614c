//! FlatMap operator implementation
//!
//! Maps every source value to an inner Observable and merges the values of
//! all inner streams into one output, completing once the source and every
//! inner stream have completed.

use crate::{
  observable::Observable,
  observer::Observer,
  rc::MutArc,
  subscription::{Disposable, Subscription},
};

#[derive(Clone)]
pub struct FlatMap<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, Inner> Observable for FlatMap<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> Inner + Send + 'static,
  Inner: Observable<Err = S::Err>,
  Inner::Item: 'static,
  S::Err: 'static,
{
  type Item = Inner::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, mut observer: O) -> Subscription
  where
    O: Observer<Inner::Item, S::Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(subscription.clone());
    let data = MutArc::own(Some(MergeData { observer, active: 1 }));
    self.source.actual_subscribe(OuterObserver {
      data,
      func: self.func,
      subscription: subscription.clone(),
    });
    subscription
  }
}

/// State shared by the outer observer and every inner observer. `None` once
/// the merged stream has terminated.
struct MergeData<O> {
  observer: O,
  /// Live streams, the outer one included.
  active: usize,
}

type SharedData<O> = MutArc<Option<MergeData<O>>>;

fn merge_error<O, Item, Err>(data: &SharedData<O>, subscription: &Subscription, err: Err)
where
  O: Observer<Item, Err>,
{
  let taken = data.rc_deref_mut().take();
  if let Some(mut data) = taken {
    data.observer.error(err);
    subscription.dispose();
  }
}

fn merge_complete<O, Item, Err>(data: &SharedData<O>, subscription: &Subscription)
where
  O: Observer<Item, Err>,
{
  let finished = {
    let mut guard = data.rc_deref_mut();
    let last = match guard.as_mut() {
      Some(d) => {
        d.active -= 1;
        d.active == 0
      }
      None => false,
    };
    if last { guard.take() } else { None }
  };
  if let Some(mut data) = finished {
    data.observer.complete();
    subscription.dispose();
  }
}

pub struct OuterObserver<O, F> {
  data: SharedData<O>,
  func: F,
  subscription: Subscription,
}

impl<Item, Err, O, F, Inner> Observer<Item, Err> for OuterObserver<O, F>
where
  O: Observer<Inner::Item, Err> + Send + 'static,
  F: FnMut(Item) -> Inner,
  Inner: Observable<Err = Err>,
  Inner::Item: 'static,
  Err: 'static,
{
  fn on_subscribe(&mut self, subscription: Subscription) { self.subscription.add(subscription); }

  fn next(&mut self, value: Item) {
    if self.subscription.is_disposed() {
      return;
    }
    let inner = (self.func)(value);
    match self.data.rc_deref_mut().as_mut() {
      Some(d) => d.active += 1,
      None => return,
    }
    inner.actual_subscribe(InnerObserver {
      data: self.data.clone(),
      subscription: self.subscription.clone(),
      own: None,
    });
  }

  fn error(&mut self, err: Err) {
    merge_error::<_, Inner::Item, _>(&self.data, &self.subscription, err)
  }

  fn complete(&mut self) { merge_complete::<_, Inner::Item, Err>(&self.data, &self.subscription) }
}

pub struct InnerObserver<O> {
  data: SharedData<O>,
  subscription: Subscription,
  own: Option<Subscription>,
}

impl<Item, Err, O> Observer<Item, Err> for InnerObserver<O>
where
  O: Observer<Item, Err>,
{
  fn on_subscribe(&mut self, subscription: Subscription) {
    self.own = Some(subscription.clone());
    self.subscription.add(subscription);
  }

  fn next(&mut self, value: Item) {
    if let Some(d) = self.data.rc_deref_mut().as_mut() {
      d.observer.next(value);
    }
  }

  fn error(&mut self, err: Err) { merge_error::<_, Item, _>(&self.data, &self.subscription, err) }

  fn complete(&mut self) {
    // Lets the composite prune this stream on its next `add`.
    if let Some(own) = self.own.take() {
      own.dispose();
    }
    merge_complete::<_, Item, Err>(&self.data, &self.subscription)
  }
}
