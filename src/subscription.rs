use std::{
  any::Any,
  fmt::{Debug, Formatter},
  sync::Arc,
};

use smallvec::SmallVec;

use crate::rc::MutArc;

mod composite;
pub use composite::CompositeDisposable;

/// A cancellation token with idempotent release.
///
/// Only the first `dispose` has an effect; later calls are no-ops. Querying
/// `is_disposed` never blocks on producer work and never changes state.
pub trait Disposable {
  /// Releases the resources held by the subscription this token belongs to.
  fn dispose(&self);

  fn is_disposed(&self) -> bool;
}

/// Type-erased disposable, the unit stored by [`Subscription`] and
/// [`CompositeDisposable`].
pub type BoxDisposable = Box<dyn Disposable + Send + Sync>;

impl<T: Disposable + ?Sized> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

/// Teardown list shared by [`Subscription`] and [`CompositeDisposable`].
///
/// Members are handed back to the caller instead of being disposed under the
/// lock, so a member's teardown may freely touch the container that owned it.
#[derive(Default)]
pub(crate) struct Inner {
  disposed: bool,
  teardown: SmallVec<[BoxDisposable; 1]>,
}

pub(crate) type Teardown = SmallVec<[BoxDisposable; 1]>;

impl Inner {
  /// Retains `d`, or returns it when this container is already disposed.
  pub(crate) fn add(&mut self, d: BoxDisposable) -> Option<BoxDisposable> {
    if self.disposed {
      Some(d)
    } else {
      self.teardown.retain(|v| !v.is_disposed());
      self.teardown.push(d);
      None
    }
  }

  pub(crate) fn take(&mut self) -> Teardown { std::mem::take(&mut self.teardown) }

  /// Marks the container disposed; yields the members only on the first call.
  pub(crate) fn close(&mut self) -> Option<Teardown> {
    if self.disposed {
      None
    } else {
      self.disposed = true;
      Some(self.take())
    }
  }

  #[inline]
  pub(crate) fn is_disposed(&self) -> bool { self.disposed }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.teardown.len() }
}

impl Debug for Inner {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Inner")
      .field("disposed", &self.disposed)
      .field("teardown_count", &self.teardown.len())
      .finish()
  }
}

pub(crate) fn dispose_all(teardown: Teardown) {
  for v in teardown {
    v.dispose();
  }
}

/// The handle of one subscription, passed to `Observer::on_subscribe` and
/// returned from every `subscribe` call.
///
/// Clones share the same state. Operators that own upstream resources (inner
/// subscriptions, scheduled tasks) attach them with [`Subscription::add`], so
/// disposing the handle tears the whole chain down.
#[derive(Clone, Default)]
pub struct Subscription(MutArc<Inner>);

impl Subscription {
  pub fn new() -> Self { Self::default() }

  /// Attaches `d` to this subscription. If the subscription is already
  /// disposed, `d` is disposed right away.
  pub fn add<D: Disposable + Send + Sync + 'static>(&self, d: D) {
    if self.is_same(&d) {
      return;
    }
    let rejected = self.0.rc_deref_mut().add(Box::new(d));
    if let Some(d) = rejected {
      d.dispose();
    }
  }

  /// Number of attached teardown members still alive.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().len() }

  /// Activates "RAII" behavior for this subscription: it is disposed as soon
  /// as the returned guard goes out of scope.
  ///
  /// **Attention:** if the guard is not bound to a variable it is dropped,
  /// and the subscription disposed, immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard(self) }

  fn is_same(&self, other: &dyn Any) -> bool {
    if let Some(other) = other.downcast_ref::<Self>() {
      self.0.ptr_eq(&other.0)
    } else {
      false
    }
  }
}

impl Disposable for Subscription {
  fn dispose(&self) {
    let teardown = self.0.rc_deref_mut().close();
    if let Some(teardown) = teardown {
      dispose_all(teardown);
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.rc_deref().is_disposed() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Subscription").field(&*self.0.rc_deref()).finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be disposed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Disposable>(pub(crate) T);

impl<T: Disposable> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: Disposable> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn dispose_is_idempotent() {
    let subscription = Subscription::new();
    let child = Subscription::new();
    subscription.add(child.clone());
    assert!(!child.is_disposed());

    subscription.dispose();
    subscription.dispose();
    assert!(subscription.is_disposed());
    assert!(child.is_disposed());
  }

  #[test]
  fn add_after_dispose_disposes_argument() {
    let subscription = Subscription::new();
    subscription.dispose();
    let late = Subscription::new();
    subscription.add(late.clone());
    assert!(late.is_disposed());
    assert_eq!(subscription.teardown_size(), 0);
  }

  #[test]
  fn add_self_is_ignored() {
    let subscription = Subscription::new();
    subscription.add(subscription.clone());
    assert_eq!(subscription.teardown_size(), 0);
    subscription.dispose();
  }

  #[test]
  fn add_prunes_disposed_members() {
    let subscription = Subscription::new();
    let l1 = Subscription::new();
    let l2 = Subscription::new();
    subscription.add(l1.clone());
    subscription.add(l2);
    assert_eq!(subscription.teardown_size(), 2);
    l1.dispose();
    subscription.add(Subscription::new());
    assert_eq!(subscription.teardown_size(), 2);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let subscription = Subscription::new();
    {
      let _guard = subscription.clone().unsubscribe_when_dropped();
      assert!(!subscription.is_disposed());
    }
    assert!(subscription.is_disposed());
  }
}
