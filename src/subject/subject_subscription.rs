use std::sync::Arc;

use super::{subject_core::SubjectState, subscribers::Slot};
use crate::{rc::WeakArc, subscription::Disposable};

/// Detaches one observer from a subject.
///
/// Holds only a weak reference to the subject, so an outstanding handle
/// never keeps a dropped subject alive. Disposing closes the shared slot
/// first, which stops delivery at once. The entry itself is removed right
/// away when the subject's lock is free; if it is held, for example because
/// the observer disposes from inside one of its own callbacks, the subject
/// prunes the entry on its next broadcast.
pub(crate) struct SubjectSubscription<Item, Err> {
  pub(crate) state: WeakArc<SubjectState<Item, Err>>,
  pub(crate) id: usize,
  pub(crate) slot: Arc<Slot>,
}

impl<Item, Err> Disposable for SubjectSubscription<Item, Err> {
  fn dispose(&self) {
    if !self.slot.close() {
      return;
    }
    if let Some(state) = self.state.upgrade() {
      let removed = state.try_rc_deref_mut().and_then(|mut guard| guard.subscribers.remove(self.id));
      drop(removed);
    }
  }

  fn is_disposed(&self) -> bool { self.slot.is_closed() }
}
