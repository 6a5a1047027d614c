use std::{
  ops::{Deref, DerefMut},
  sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, MutexGuard,
  },
  thread::{self, ThreadId},
};

use super::{
  subject_subscription::SubjectSubscription,
  subscribers::{Entry, Slot, Subscribers},
};
use crate::{observer::BoxObserver, rc::MutArc, subscription::Subscription};

/// Lifecycle phase of a subject. Both terminal phases are permanent.
pub(crate) enum Phase<Err> {
  Active,
  Completed,
  Errored(Err),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum PhaseKind {
  Active,
  Completed,
  Errored,
}

impl<Err> Phase<Err> {
  fn kind(&self) -> PhaseKind {
    match self {
      Phase::Active => PhaseKind::Active,
      Phase::Completed => PhaseKind::Completed,
      Phase::Errored(_) => PhaseKind::Errored,
    }
  }
}

/// What a subject variant keeps of the values pushed into it, and what a new
/// subscriber is handed from that history.
pub(crate) trait ReplayPolicy<Item> {
  /// Stores `value` as needed. Returns `false` to hold it back from the live
  /// observers.
  fn record(&mut self, value: &Item) -> bool;

  /// Values handed to an observer subscribing while the subject is in
  /// `phase`, before it goes live or receives the terminal signal.
  fn replay(&self, phase: PhaseKind) -> &[Item];

  /// Values delivered to the live observers right before completion.
  fn on_complete(&self) -> &[Item] { &[] }
}

pub(crate) struct SubjectState<Item, Err> {
  pub(crate) phase: Phase<Err>,
  pub(crate) subscribers: Subscribers<Item, Err>,
}

/// The state shared by every clone of one subject.
///
/// # Re-entrancy
///
/// Every operation (push, terminal transition, subscribe) runs as one
/// critical section under the `state` lock, callbacks included. A
/// subscriber therefore sees either the whole state before a terminal
/// transition, and then the transition live, or the terminal state alone.
/// Other threads block on the lock; the emitting thread itself is tracked
/// in `emitter` so that calls made from inside a callback can be told apart:
///
/// - `next`, `error` and `complete` panic. Feedback loops need an explicit
///   scheduler hop such as `observe_on`.
/// - `subscribe` is deferred. The observer gets its subscription at once and
///   is attached when the current operation finishes, so it never sees the
///   in-progress value live. Disposing before that cancels the attach.
/// - `observer_count`, `is_terminated` and the history readers never touch
///   `state`; they read atomics and the briefly held `policy` lock.
pub(crate) struct SubjectCore<Item, Err, P> {
  state: MutArc<SubjectState<Item, Err>>,
  policy: MutArc<P>,
  emitter: MutArc<Option<ThreadId>>,
  deferred: MutArc<Vec<Entry<Item, Err>>>,
  live: Arc<AtomicUsize>,
  terminated: Arc<AtomicBool>,
  next_id: Arc<AtomicUsize>,
}

impl<Item, Err, P> Clone for SubjectCore<Item, Err, P> {
  fn clone(&self) -> Self {
    SubjectCore {
      state: self.state.clone(),
      policy: self.policy.clone(),
      emitter: self.emitter.clone(),
      deferred: self.deferred.clone(),
      live: self.live.clone(),
      terminated: self.terminated.clone(),
      next_id: self.next_id.clone(),
    }
  }
}

/// Holds the `state` lock and records the owning thread until dropped.
struct EmitGuard<'a, Item, Err> {
  state: MutexGuard<'a, SubjectState<Item, Err>>,
  emitter: &'a MutArc<Option<ThreadId>>,
}

impl<'a, Item, Err> Deref for EmitGuard<'a, Item, Err> {
  type Target = SubjectState<Item, Err>;
  fn deref(&self) -> &Self::Target { &self.state }
}

impl<'a, Item, Err> DerefMut for EmitGuard<'a, Item, Err> {
  fn deref_mut(&mut self) -> &mut Self::Target { &mut self.state }
}

impl<'a, Item, Err> Drop for EmitGuard<'a, Item, Err> {
  // Runs before `state` is unlocked.
  fn drop(&mut self) { *self.emitter.rc_deref_mut() = None; }
}

impl<Item, Err, P> SubjectCore<Item, Err, P>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
  P: ReplayPolicy<Item> + Send + 'static,
{
  pub(crate) fn new(policy: P) -> Self {
    SubjectCore {
      state: MutArc::own(SubjectState { phase: Phase::Active, subscribers: Subscribers::default() }),
      policy: MutArc::own(policy),
      emitter: MutArc::own(None),
      deferred: MutArc::own(vec![]),
      live: Arc::new(AtomicUsize::new(0)),
      terminated: Arc::new(AtomicBool::new(false)),
      next_id: Arc::new(AtomicUsize::new(0)),
    }
  }

  /// Takes the `state` lock, blocking while another thread holds it.
  /// `None` if the calling thread already holds it.
  fn lock_state(&self) -> Option<EmitGuard<'_, Item, Err>> {
    let current = thread::current().id();
    let state = match self.state.try_rc_deref_mut() {
      Some(state) => state,
      None if *self.emitter.rc_deref() == Some(current) => return None,
      None => self.state.rc_deref_mut(),
    };
    *self.emitter.rc_deref_mut() = Some(current);
    Some(EmitGuard { state, emitter: &self.emitter })
  }

  pub(crate) fn next(&self, value: Item) {
    let Some(mut state) = self.lock_state() else { reentrant_emission("next") };
    if state.phase.kind() == PhaseKind::Active {
      let forward = self.policy.rc_deref_mut().record(&value);
      if forward {
        state.subscribers.broadcast_value(value);
      }
    }
    self.attach_deferred(&mut state);
  }

  pub(crate) fn error(&self, err: Err) {
    let Some(mut state) = self.lock_state() else { reentrant_emission("error") };
    if state_is_terminal(&state.phase, "error") {
      return;
    }
    state.phase = Phase::Errored(err.clone());
    self.terminated.store(true, Ordering::Release);
    let entries = state.subscribers.drain();
    log::trace!("subject errored, notifying {} observer(s)", entries.len());
    for mut entry in entries {
      if entry.slot.close() {
        entry.observer.error(err.clone());
      }
    }
    self.attach_deferred(&mut state);
  }

  pub(crate) fn complete(&self) {
    let Some(mut state) = self.lock_state() else { reentrant_emission("complete") };
    if state_is_terminal(&state.phase, "complete") {
      return;
    }
    state.phase = Phase::Completed;
    self.terminated.store(true, Ordering::Release);
    let entries = state.subscribers.drain();
    log::trace!("subject completed, notifying {} observer(s)", entries.len());
    let tail = self.policy.rc_deref().on_complete().to_vec();
    for mut entry in entries {
      for v in &tail {
        if entry.slot.is_closed() {
          break;
        }
        entry.observer.next(v.clone());
      }
      if entry.slot.close() {
        entry.observer.complete();
      }
    }
    self.attach_deferred(&mut state);
  }

  /// Attaches `observer`: hands it its subscription, replays what the
  /// variant keeps, then either registers it for live events or delivers
  /// the terminal signal.
  pub(crate) fn subscribe(&self, mut observer: BoxObserver<Item, Err>) -> Subscription {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    let slot = Slot::open(self.live.clone());
    let subscription = Subscription::new();
    subscription.add(SubjectSubscription { state: self.state.downgrade(), id, slot: slot.clone() });
    observer.on_subscribe(subscription.clone());

    let entry = Entry { id, slot, observer };
    match self.lock_state() {
      Some(mut state) => {
        self.attach(&mut state, entry);
        self.attach_deferred(&mut state);
      }
      None => {
        log::trace!("subscribe from inside a callback, attaching after the current operation");
        self.deferred.rc_deref_mut().push(entry);
      }
    }
    subscription
  }

  fn attach(&self, state: &mut SubjectState<Item, Err>, mut entry: Entry<Item, Err>) {
    let replay = self.policy.rc_deref().replay(state.phase.kind()).to_vec();
    for v in replay {
      if entry.slot.is_closed() {
        return;
      }
      entry.observer.next(v);
    }
    if entry.slot.is_closed() {
      return;
    }
    match &state.phase {
      Phase::Active => state.subscribers.insert(entry),
      Phase::Completed => {
        if entry.slot.close() {
          entry.observer.complete();
        }
      }
      Phase::Errored(err) => {
        if entry.slot.close() {
          entry.observer.error(err.clone());
        }
      }
    }
  }

  /// Attaches the observers that subscribed from inside a callback, including
  /// those subscribing while earlier ones are being attached.
  fn attach_deferred(&self, state: &mut SubjectState<Item, Err>) {
    loop {
      let pending = std::mem::take(&mut *self.deferred.rc_deref_mut());
      if pending.is_empty() {
        return;
      }
      for entry in pending {
        self.attach(state, entry);
      }
    }
  }

  pub(crate) fn observer_count(&self) -> usize { self.live.load(Ordering::Acquire) }

  pub(crate) fn is_terminated(&self) -> bool { self.terminated.load(Ordering::Acquire) }

  /// Reads the variant's history. Safe from inside a callback.
  pub(crate) fn with_policy<R>(&self, f: impl FnOnce(&P) -> R) -> R { f(&self.policy.rc_deref()) }
}

fn reentrant_emission(signal: &str) -> ! {
  panic!(
    "re-entrant subject emissions are not supported ({signal} called from inside a callback of the \
     same subject). Hop through a scheduler with `observe_on` if you need a feedback loop."
  )
}

fn state_is_terminal<Err>(phase: &Phase<Err>, signal: &str) -> bool {
  let kind = phase.kind();
  if kind != PhaseKind::Active {
    log::trace!("{signal} ignored, subject already {kind:?}");
  }
  kind != PhaseKind::Active
}
