use super::subject_core::{PhaseKind, ReplayPolicy, SubjectCore};

/// Holds back every value and keeps the last one for completion.
pub(crate) struct LastPolicy<Item>(Option<Item>);

impl<Item: Clone> ReplayPolicy<Item> for LastPolicy<Item> {
  fn record(&mut self, value: &Item) -> bool {
    self.0 = Some(value.clone());
    false
  }

  fn replay(&self, phase: PhaseKind) -> &[Item] {
    match phase {
      PhaseKind::Completed => self.0.as_slice(),
      PhaseKind::Active | PhaseKind::Errored => &[],
    }
  }

  fn on_complete(&self) -> &[Item] { self.0.as_slice() }
}

impl_subject!(
  /// Emits nothing until completion, then the single last value (if any)
  /// followed by completion, to current and later subscribers alike. An
  /// error delivers the error alone.
  AsyncSubject,
  LastPolicy<Item>
);

impl<Item, Err> AsyncSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  pub fn new() -> Self { AsyncSubject(SubjectCore::new(LastPolicy(None))) }
}

impl<Item, Err> Default for AsyncSubject<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  type Log = Arc<Mutex<Vec<Notification<&'static str, RxError>>>>;

  fn record(subject: &AsyncSubject<&'static str>) -> Log {
    let log: Log = Arc::new(Mutex::new(vec![]));
    let (c1, c2, c3) = (log.clone(), log.clone(), log.clone());
    subject.clone().subscribe_all(
      move |v| c1.lock().unwrap().push(Notification::Next(v)),
      move |e| c2.lock().unwrap().push(Notification::Error(e)),
      move || c3.lock().unwrap().push(Notification::Complete),
    );
    log
  }

  fn is_last_then_complete(log: &Log, last: &str) -> bool {
    matches!(
      log.lock().unwrap().as_slice(),
      [Notification::Next(v), Notification::Complete] if *v == last
    )
  }

  #[test]
  fn last_value_on_completion() {
    let subject = AsyncSubject::new();
    let early = record(&subject);
    subject.next("a");
    let middle = record(&subject);
    subject.next("b");
    subject.next("c");
    assert!(early.lock().unwrap().is_empty());
    subject.complete();
    let late = record(&subject);

    for log in [&early, &middle, &late] {
      assert!(is_last_then_complete(log, "c"));
    }
  }

  #[test]
  fn error_delivers_no_value() {
    let subject = AsyncSubject::new();
    let early = record(&subject);
    subject.next("a");
    subject.error(RxError::msg("boom"));
    let late = record(&subject);

    for log in [early, late] {
      let log = log.lock().unwrap();
      assert_eq!(log.len(), 1);
      assert!(matches!(log[0], Notification::Error(_)));
    }
  }

  #[test]
  fn completion_without_values() {
    let subject = AsyncSubject::new();
    let log = record(&subject);
    subject.complete();
    assert!(matches!(log.lock().unwrap().as_slice(), [Notification::Complete]));
  }

  #[test]
  fn double_completion_is_noop() {
    let subject = AsyncSubject::new();
    let log = record(&subject);
    subject.next("x");
    subject.complete();
    subject.complete();
    subject.error(RxError::msg("late"));
    assert!(is_last_then_complete(&log, "x"));
  }
}
