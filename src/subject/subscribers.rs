use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};

use crate::observer::BoxObserver;

/// Liveness of one attached observer, shared with its subscription handle.
///
/// Each open slot counts once in the subject's `live` counter. Whoever
/// closes the slot first (disposal or terminal delivery) takes it off the
/// count.
pub(crate) struct Slot {
  closed: AtomicBool,
  live: Arc<AtomicUsize>,
}

impl Slot {
  pub(crate) fn open(live: Arc<AtomicUsize>) -> Arc<Slot> {
    live.fetch_add(1, Ordering::AcqRel);
    Arc::new(Slot { closed: AtomicBool::new(false), live })
  }

  #[inline]
  pub(crate) fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }

  /// Closes the slot. `true` only for the call that actually closed it.
  pub(crate) fn close(&self) -> bool {
    if self.closed.swap(true, Ordering::AcqRel) {
      return false;
    }
    self.live.fetch_sub(1, Ordering::AcqRel);
    true
  }
}

/// One attached observer. Its slot is closed by the subscription handle and
/// is honored even while the entry is still in the list.
pub(crate) struct Entry<Item, Err> {
  pub(crate) id: usize,
  pub(crate) slot: Arc<Slot>,
  pub(crate) observer: BoxObserver<Item, Err>,
}

/// The observers attached to a subject, in subscription order.
pub(crate) struct Subscribers<Item, Err> {
  entries: Vec<Entry<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Subscribers { entries: vec![] } }
}

impl<Item, Err> Subscribers<Item, Err> {
  pub(crate) fn insert(&mut self, entry: Entry<Item, Err>) { self.entries.push(entry) }

  pub(crate) fn remove(&mut self, id: usize) -> Option<Entry<Item, Err>> {
    let idx = self.entries.iter().position(|e| e.id == id)?;
    Some(self.entries.remove(idx))
  }

  /// Drops entries whose subscription was disposed.
  pub(crate) fn prune(&mut self) { self.entries.retain(|e| !e.slot.is_closed()) }

  /// Broadcast value to all open observers. The last one receives the moved
  /// value instead of a clone.
  pub(crate) fn broadcast_value(&mut self, value: Item)
  where
    Item: Clone,
  {
    self.prune();
    let mut iter = self.entries.iter_mut().peekable();
    while let Some(entry) = iter.next() {
      if entry.slot.is_closed() {
        continue;
      }
      if iter.peek().is_some() {
        entry.observer.next(value.clone());
      } else {
        entry.observer.next(value);
        break;
      }
    }
  }

  /// Removes every observer and hands them back, in subscription order, for
  /// terminal delivery.
  pub(crate) fn drain(&mut self) -> Vec<Entry<Item, Err>> { std::mem::take(&mut self.entries) }
}
