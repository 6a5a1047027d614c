//! Subjects: observers you push into and observables you subscribe to, in
//! four replay variants.
//!
//! | Variant | A new subscriber receives |
//! |---|---|
//! | [`PublishSubject`] | only what is pushed after it subscribed |
//! | [`BehaviorSubject`] | the latest value (or seed), then live events |
//! | [`AsyncSubject`] | the last value and completion, once completed |
//! | [`ReplaySubject`] | the whole history, then live events |
//!
//! Once terminal, a subject stays terminal: further pushes are ignored, and
//! late subscribers receive what their variant replays in that phase plus
//! the terminal signal. Clones share one state.
//!
//! Callbacks may inspect the subject they are attached to, dispose their own
//! subscription, or subscribe further observers to it; those are attached
//! once the current push has been delivered. Pushing into the same subject
//! from one of its callbacks panics.

/// Declares a subject variant over `SubjectCore` with the
/// given replay policy: the push methods, inspection, and both the
/// `Observer` and `Observable` halves.
macro_rules! impl_subject {
  ($(#[$attr:meta])* $name:ident, $policy:ty) => {
    $(#[$attr])*
    pub struct $name<Item, Err = $crate::error::RxError>(
      $crate::subject::subject_core::SubjectCore<Item, Err, $policy>,
    );

    impl<Item, Err> Clone for $name<Item, Err> {
      fn clone(&self) -> Self { $name(self.0.clone()) }
    }

    impl<Item, Err> $name<Item, Err>
    where
      Item: Clone + Send + 'static,
      Err: Clone + Send + 'static,
    {
      /// Pushes a value. Ignored once the subject is terminal.
      pub fn next(&self, value: Item) { self.0.next(value) }

      /// Terminates the subject with `err`. Only the first terminal signal
      /// has an effect.
      pub fn error(&self, err: Err) { self.0.error(err) }

      /// Completes the subject. Only the first terminal signal has an
      /// effect.
      pub fn complete(&self) { self.0.complete() }

      /// Number of observers currently attached.
      pub fn observer_count(&self) -> usize { self.0.observer_count() }

      pub fn is_terminated(&self) -> bool { self.0.is_terminated() }
    }

    impl<Item, Err> $crate::observer::Observer<Item, Err> for $name<Item, Err>
    where
      Item: Clone + Send + 'static,
      Err: Clone + Send + 'static,
    {
      fn on_subscribe(&mut self, subscription: $crate::subscription::Subscription) {
        if self.0.is_terminated() {
          $crate::subscription::Disposable::dispose(&subscription);
        }
      }

      #[inline]
      fn next(&mut self, value: Item) { self.0.next(value) }

      #[inline]
      fn error(&mut self, err: Err) { self.0.error(err) }

      #[inline]
      fn complete(&mut self) { self.0.complete() }
    }

    impl<Item, Err> $crate::observable::Observable for $name<Item, Err>
    where
      Item: Clone + Send + 'static,
      Err: Clone + Send + 'static,
    {
      type Item = Item;
      type Err = Err;

      fn actual_subscribe<O>(self, observer: O) -> $crate::subscription::Subscription
      where
        O: $crate::observer::Observer<Item, Err> + Send + 'static,
      {
        self.0.subscribe(Box::new(observer))
      }
    }
  };
}

mod subject_core;
mod subject_subscription;
mod subscribers;

mod async_subject;
mod behavior_subject;
mod publish_subject;
mod replay_subject;

pub use async_subject::AsyncSubject;
pub use behavior_subject::BehaviorSubject;
pub use publish_subject::PublishSubject;
pub use replay_subject::ReplaySubject;

#[cfg(test)]
mod test {
  use std::{
    sync::{Arc, Barrier, Mutex},
    thread,
  };

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[test]
  fn subject_subscribes_to_an_observable() {
    let subject = ReplaySubject::<i32>::new();
    observable::from_iter(1..4).subscribe_with(subject.clone());
    assert!(subject.is_terminated());
    assert_eq!(subject.values(), vec![1, 2, 3]);
  }

  #[test]
  fn terminated_subject_disposes_new_upstream() {
    let subject = PublishSubject::<i32>::new();
    subject.complete();
    let upstream = PublishSubject::<i32>::new();
    let subscription = upstream.clone().subscribe_with(subject.clone());
    assert!(subscription.is_disposed());
    assert_eq!(upstream.observer_count(), 0);
  }

  #[test]
  fn dispose_inside_callback() {
    let subject = PublishSubject::<i32>::new();
    let seen = Arc::new(Mutex::new(vec![]));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let (c_seen, c_slot) = (seen.clone(), slot.clone());

    let subscription = subject.clone().subscribe(move |v| {
      c_seen.lock().unwrap().push(v);
      if let Some(s) = c_slot.lock().unwrap().as_ref() {
        s.dispose();
      }
    });
    *slot.lock().unwrap() = Some(subscription);

    subject.next(1);
    subject.next(2);
    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn concurrent_pushes_and_subscribes() {
    let subject = ReplaySubject::<usize>::new();
    let totals = Arc::new(Mutex::new(vec![]));
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let subject = subject.clone();
        let totals = totals.clone();
        std::thread::spawn(move || {
          let count = Arc::new(Mutex::new(0));
          let c_count = count.clone();
          let c_totals = totals.clone();
          subject.clone().subscribe_all(
            move |_| *c_count.lock().unwrap() += 1,
            |_| {},
            move || c_totals.lock().unwrap().push(*count.lock().unwrap()),
          );
        })
      })
      .collect();
    for i in 0..100 {
      subject.next(i);
    }
    handles.into_iter().for_each(|h| h.join().unwrap());
    subject.complete();

    assert_eq!(*totals.lock().unwrap(), vec![100; 4]);
  }

  #[test]
  fn subscribe_inside_callback_attaches_after_the_push() {
    let subject = PublishSubject::<i32>::new();
    let late = Arc::new(Mutex::new(vec![]));
    let attached = Arc::new(Mutex::new(false));
    let (c_subject, c_late, c_attached) = (subject.clone(), late.clone(), attached.clone());

    subject.clone().subscribe(move |_| {
      let mut attached = c_attached.lock().unwrap();
      if !*attached {
        *attached = true;
        let c_late = c_late.clone();
        c_subject.clone().subscribe(move |v| c_late.lock().unwrap().push(v));
      }
    });

    subject.next(1);
    assert_eq!(subject.observer_count(), 2);
    subject.next(2);
    subject.next(3);
    assert_eq!(*late.lock().unwrap(), vec![2, 3]);
  }

  #[test]
  fn replay_subscriber_added_inside_callback_gets_history() {
    let subject = ReplaySubject::<i32>::new();
    let late = Arc::new(Mutex::new(vec![]));
    let (c_subject, c_late) = (subject.clone(), late.clone());
    let subscribed = Arc::new(Mutex::new(false));
    let c_subscribed = subscribed.clone();

    subject.clone().subscribe(move |_| {
      if !std::mem::replace(&mut *c_subscribed.lock().unwrap(), true) {
        let c_late = c_late.clone();
        c_subject.clone().subscribe(move |v| c_late.lock().unwrap().push(v));
      }
    });

    subject.next(1);
    subject.next(2);
    assert_eq!(*late.lock().unwrap(), vec![1, 2]);
  }

  #[test]
  fn disposing_a_deferred_subscription_cancels_it() {
    let subject = PublishSubject::<i32>::new();
    let late = Arc::new(Mutex::new(vec![]));
    let (c_subject, c_late) = (subject.clone(), late.clone());

    let first = subject.clone().subscribe(move |_| {
      let c_late = c_late.clone();
      c_subject.clone().subscribe(move |v| c_late.lock().unwrap().push(v)).dispose();
    });

    subject.next(1);
    subject.next(2);
    first.dispose();
    subject.next(3);
    assert!(late.lock().unwrap().is_empty());
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn state_readable_inside_callbacks() {
    let subject = PublishSubject::<i32>::new();
    let seen = Arc::new(Mutex::new(vec![]));
    let (c_subject, e_subject, c_seen, e_seen) = (subject.clone(), subject.clone(), seen.clone(), seen.clone());

    subject.clone().subscribe_all(
      move |_| c_seen.lock().unwrap().push((c_subject.observer_count(), c_subject.is_terminated())),
      |_| {},
      move || e_seen.lock().unwrap().push((e_subject.observer_count(), e_subject.is_terminated())),
    );
    subject.next(1);
    subject.complete();

    assert_eq!(*seen.lock().unwrap(), vec![(1, false), (0, true)]);
  }

  #[test]
  #[should_panic(expected = "re-entrant subject emissions are not supported")]
  fn next_inside_own_callback_panics() {
    let subject = PublishSubject::<i32>::new();
    let c_subject = subject.clone();
    subject.clone().subscribe(move |v| c_subject.next(v + 1));
    subject.next(1);
  }

  #[test]
  #[should_panic(expected = "re-entrant subject emissions are not supported")]
  fn complete_inside_own_callback_panics() {
    let subject = PublishSubject::<i32>::new();
    let c_subject = subject.clone();
    subject.clone().subscribe(move |_| c_subject.complete());
    subject.next(1);
  }

  type Terminals = Arc<Mutex<usize>>;

  /// Subscribes from `threads` threads released together with the caller,
  /// which runs `race` once the barrier opens.
  fn race_subscribes<S>(
    subject: S,
    threads: usize,
    race: impl FnOnce(),
  ) -> Vec<(Arc<Mutex<Vec<usize>>>, Terminals)>
  where
    S: Observable<Item = usize, Err = RxError> + Clone + Send + 'static,
  {
    let barrier = Arc::new(Barrier::new(threads + 1));
    let handles: Vec<_> = (0..threads)
      .map(|_| {
        let (subject, barrier) = (subject.clone(), barrier.clone());
        thread::spawn(move || {
          let log = Arc::new(Mutex::new(vec![]));
          let terminals = Arc::new(Mutex::new(0));
          let (c_log, e_terminals, c_terminals) = (log.clone(), terminals.clone(), terminals.clone());
          barrier.wait();
          subject.subscribe_all(
            move |v| c_log.lock().unwrap().push(v),
            move |_| *e_terminals.lock().unwrap() += 1,
            move || *c_terminals.lock().unwrap() += 1,
          );
          (log, terminals)
        })
      })
      .collect();
    barrier.wait();
    race();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  }

  #[test]
  fn subscribes_racing_completion_get_full_history_and_one_terminal() {
    for _ in 0..20 {
      let subject = ReplaySubject::<usize>::new();
      (0..10).for_each(|v| subject.next(v));
      let c_subject = subject.clone();
      let results = race_subscribes(subject, 4, move || {
        (10..20).for_each(|v| c_subject.next(v));
        c_subject.complete();
      });
      for (log, terminals) in results {
        assert_eq!(*log.lock().unwrap(), (0..20).collect::<Vec<_>>());
        assert_eq!(*terminals.lock().unwrap(), 1);
      }
    }
  }

  #[test]
  fn subscribes_racing_error_get_exactly_one_terminal() {
    for _ in 0..20 {
      let subject = PublishSubject::<usize>::new();
      let c_subject = subject.clone();
      let results = race_subscribes(subject, 4, move || c_subject.error(RxError::msg("boom")));
      for (_, terminals) in results {
        assert_eq!(*terminals.lock().unwrap(), 1);
      }
    }
  }

  fn broadcast_to_many() {
    let subject = PublishSubject::<usize>::new();
    let total = Arc::new(Mutex::new(0));
    let subscriptions: Vec<_> = (0..16)
      .map(|_| {
        let total = total.clone();
        subject.clone().subscribe(move |v| *total.lock().unwrap() += v)
      })
      .collect();
    (0..100).for_each(|v| subject.next(v));
    subscriptions.iter().for_each(|s| s.dispose());
    assert_eq!(*total.lock().unwrap(), 16 * 4950);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_broadcast);

  fn bench_broadcast(b: &mut Bencher) { b.iter(broadcast_to_many); }
}
