use super::subject_core::{PhaseKind, ReplayPolicy, SubjectCore};

/// Keeps the most recent value, replayed only while the subject is active.
pub(crate) struct LatestPolicy<Item>(Option<Item>);

impl<Item: Clone> ReplayPolicy<Item> for LatestPolicy<Item> {
  fn record(&mut self, value: &Item) -> bool {
    self.0 = Some(value.clone());
    true
  }

  fn replay(&self, phase: PhaseKind) -> &[Item] {
    match phase {
      PhaseKind::Active => self.0.as_slice(),
      PhaseKind::Completed | PhaseKind::Errored => &[],
    }
  }
}

impl_subject!(
  /// Remembers the latest value. A new subscriber first receives that value,
  /// or the seed if nothing was pushed yet, then every later event.
  ///
  /// Once the subject is terminal the latest value is no longer replayed: a
  /// late subscriber receives the terminal signal alone.
  BehaviorSubject,
  LatestPolicy<Item>
);

impl<Item, Err> BehaviorSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  /// A subject without a seed: subscribers receive nothing until the first
  /// push.
  pub fn new() -> Self { BehaviorSubject(SubjectCore::new(LatestPolicy(None))) }

  /// A subject seeded with `value`, replayed until the first push replaces
  /// it.
  pub fn with_value(value: Item) -> Self { BehaviorSubject(SubjectCore::new(LatestPolicy(Some(value)))) }

  /// The latest value, or the seed. Kept after termination, and readable
  /// from inside the subject's own callbacks.
  pub fn value(&self) -> Option<Item> { self.0.with_policy(|p| p.0.clone()) }
}

impl<Item, Err> Default for BehaviorSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  fn default() -> Self { Self::new() }
}
