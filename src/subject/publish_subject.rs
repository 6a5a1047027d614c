use super::subject_core::{PhaseKind, ReplayPolicy, SubjectCore};

/// Keeps no history.
pub(crate) struct PublishPolicy;

impl<Item> ReplayPolicy<Item> for PublishPolicy {
  #[inline]
  fn record(&mut self, _: &Item) -> bool { true }

  #[inline]
  fn replay(&self, _: PhaseKind) -> &[Item] { &[] }
}

impl_subject!(
  /// Multicasts live events only. A subscriber receives what is pushed after
  /// it subscribed; subscribing to a terminal subject yields just the
  /// terminal signal.
  ///
  /// ```
  /// use rxpush::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let subject = PublishSubject::<&str>::new();
  /// let seen = Arc::new(Mutex::new(vec![]));
  /// let c_seen = seen.clone();
  ///
  /// subject.next("missed");
  /// subject.clone().subscribe(move |v| c_seen.lock().unwrap().push(v));
  /// subject.next("seen");
  ///
  /// assert_eq!(*seen.lock().unwrap(), vec!["seen"]);
  /// ```
  PublishSubject,
  PublishPolicy
);

impl<Item, Err> PublishSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  pub fn new() -> Self { PublishSubject(SubjectCore::new(PublishPolicy)) }
}

impl<Item, Err> Default for PublishSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  fn default() -> Self { Self::new() }
}
