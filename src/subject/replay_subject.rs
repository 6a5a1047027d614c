use super::subject_core::{PhaseKind, ReplayPolicy, SubjectCore};

/// Keeps every value ever pushed.
pub(crate) struct HistoryPolicy<Item>(Vec<Item>);

impl<Item: Clone> ReplayPolicy<Item> for HistoryPolicy<Item> {
  fn record(&mut self, value: &Item) -> bool {
    self.0.push(value.clone());
    true
  }

  #[inline]
  fn replay(&self, _: PhaseKind) -> &[Item] { &self.0 }
}

impl_subject!(
  /// Replays the entire history to every subscriber, whenever it subscribes,
  /// followed by live events and the terminal signal.
  ///
  /// The history is unbounded and lives as long as the subject.
  ReplaySubject,
  HistoryPolicy<Item>
);

impl<Item, Err> ReplaySubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  pub fn new() -> Self { ReplaySubject(SubjectCore::new(HistoryPolicy(vec![]))) }

  /// A copy of every value pushed so far. Safe to call from inside the
  /// subject's own callbacks.
  pub fn values(&self) -> Vec<Item> { self.0.with_policy(|p| p.0.clone()) }
}

impl<Item, Err> Default for ReplaySubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  fn default() -> Self { Self::new() }
}
