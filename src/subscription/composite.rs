use std::fmt::{Debug, Formatter};

use super::{dispose_all, Disposable, Inner};
use crate::rc::MutArc;

/// An aggregate lifecycle holder for a group of subscriptions.
///
/// `clear` disposes the current members and keeps the composite usable;
/// `dispose` is terminal, and every later `add` disposes its argument on the
/// spot instead of retaining it.
///
/// ```rust
/// use rxpush::prelude::*;
///
/// let bag = CompositeDisposable::new();
/// let a = Subscription::new();
/// bag.add(a.clone());
/// bag.clear();
/// assert!(a.is_disposed());
///
/// let b = Subscription::new();
/// assert!(bag.add(b.clone()));
/// bag.dispose();
/// assert!(b.is_disposed());
///
/// let c = Subscription::new();
/// assert!(!bag.add(c.clone()));
/// assert!(c.is_disposed());
/// ```
#[derive(Clone, Default)]
pub struct CompositeDisposable(MutArc<Inner>);

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  /// Retains `d`, returning `true`. A disposed composite disposes `d`
  /// synchronously and returns `false`.
  pub fn add<D>(&self, d: D) -> bool
  where
    D: Disposable + Send + Sync + 'static,
  {
    let rejected = self.0.rc_deref_mut().add(Box::new(d));
    match rejected {
      Some(d) => {
        d.dispose();
        false
      }
      None => true,
    }
  }

  /// [`CompositeDisposable::add`] applied to each item in order.
  pub fn add_all<I>(&self, items: I)
  where
    I: IntoIterator,
    I::Item: Disposable + Send + Sync + 'static,
  {
    for d in items {
      self.add(d);
    }
  }

  /// Disposes every member and empties the set. The composite stays usable.
  pub fn clear(&self) {
    let teardown = self.0.rc_deref_mut().take();
    log::debug!("composite disposable cleared, {} member(s) disposed", teardown.len());
    dispose_all(teardown);
  }

  pub fn len(&self) -> usize { self.0.rc_deref().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let teardown = self.0.rc_deref_mut().close();
    if let Some(teardown) = teardown {
      log::debug!("composite disposable disposed, {} member(s) disposed", teardown.len());
      dispose_all(teardown);
    }
  }

  fn is_disposed(&self) -> bool { self.0.rc_deref().is_disposed() }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("CompositeDisposable").field(&*self.0.rc_deref()).finish()
  }
}
