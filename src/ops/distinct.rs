//! Distinct operator implementation
//!
//! Emits each value the first time it is seen and suppresses every later
//! repeat of it.

use std::{collections::HashSet, hash::Hash};

use crate::{observable::Observable, observer::Observer, subscription::Subscription};

#[derive(Clone)]
pub struct Distinct<S> {
  pub(crate) source: S,
}

impl<S> Observable for Distinct<S>
where
  S: Observable,
  S::Item: Eq + Hash + Clone + Send + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe<O>(self, observer: O) -> Subscription
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(DistinctObserver { observer, seen: HashSet::new() })
  }
}

pub struct DistinctObserver<O, Item> {
  observer: O,
  seen: HashSet<Item>,
}

impl<O, Item, Err> Observer<Item, Err> for DistinctObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: Hash + Eq + Clone,
{
  forward_observer!(on_subscribe, error, complete);

  fn next(&mut self, value: Item) {
    if !self.seen.contains(&value) {
      self.seen.insert(value.clone());
      self.observer.next(value);
    }
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn smoke() {
    let x = Arc::new(Mutex::new(vec![]));
    let x_c = x.clone();
    observable::from_iter(0..20)
      .map(|v| v % 5)
      .distinct()
      .subscribe(move |v| x_c.lock().unwrap().push(v));
    assert_eq!(&*x.lock().unwrap(), &[0, 1, 2, 3, 4]);
  }

  #[test]
  fn keeps_first_occurrence_order() {
    let x = Arc::new(Mutex::new(vec![]));
    let x_c = x.clone();
    crate::just!("b", "a", "b", "c", "a")
      .distinct()
      .subscribe(move |v| x_c.lock().unwrap().push(v));
    assert_eq!(&*x.lock().unwrap(), &["b", "a", "c"]);
  }

  #[test]
  fn every_subscription_starts_fresh() {
    let source = crate::just!(1, 1, 2).distinct();
    let count = Arc::new(Mutex::new(0));
    let (c1, c2) = (count.clone(), count.clone());
    source.clone().subscribe(move |_| *c1.lock().unwrap() += 1);
    source.subscribe(move |_| *c2.lock().unwrap() += 1);
    assert_eq!(*count.lock().unwrap(), 4);
  }
}
