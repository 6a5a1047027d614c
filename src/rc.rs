use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};

/// Shared, mutable ownership of a value behind a mutex.
///
/// Every piece of state that crosses a scheduler hop lives in a `MutArc`. A
/// poisoned lock is recovered rather than propagated: a panicking observer
/// must not take every other subscription of the same stream down with it.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> { self.rc_deref() }

  /// Locks without blocking; `None` if the lock is held, possibly by the
  /// calling thread itself.
  pub fn try_rc_deref_mut(&self) -> Option<MutexGuard<'_, T>> {
    match self.0.try_lock() {
      Ok(guard) => Some(guard),
      Err(TryLockError::Poisoned(p)) => Some(p.into_inner()),
      Err(TryLockError::WouldBlock) => None,
    }
  }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  pub fn downgrade(&self) -> WeakArc<T> { WeakArc(Arc::downgrade(&self.0)) }
}

/// Non-owning counterpart of [`MutArc`].
pub struct WeakArc<T>(Weak<Mutex<T>>);

impl<T> WeakArc<T> {
  pub fn upgrade(&self) -> Option<MutArc<T>> { self.0.upgrade().map(MutArc) }
}

impl<T> Clone for WeakArc<T> {
  fn clone(&self) -> Self { WeakArc(self.0.clone()) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<T> for MutArc<T> {
  fn from(t: T) -> Self { Self::own(t) }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::thread;

  #[test]
  fn shared_between_threads() {
    let counter = MutArc::own(0);
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let c = counter.clone();
        thread::spawn(move || *c.rc_deref_mut() += 1)
      })
      .collect();
    handles.into_iter().for_each(|h| h.join().unwrap());
    assert_eq!(*counter.rc_deref(), 4);
  }

  #[test]
  fn recovers_from_poison() {
    let value = MutArc::own(vec![1]);
    let c_value = value.clone();
    let _ = thread::spawn(move || {
      let _guard = c_value.rc_deref_mut();
      panic!("poison the lock");
    })
    .join();
    value.rc_deref_mut().push(2);
    assert_eq!(*value.rc_deref(), vec![1, 2]);
  }

  #[test]
  fn try_lock_while_held() {
    let value = MutArc::own(1);
    let guard = value.rc_deref_mut();
    assert!(value.try_rc_deref_mut().is_none());
    drop(guard);
    assert_eq!(value.try_rc_deref_mut().map(|v| *v), Some(1));
  }

  #[test]
  fn weak_does_not_keep_alive() {
    let value = MutArc::own(1);
    let weak = value.downgrade();
    assert!(weak.upgrade().is_some());
    drop(value);
    assert!(weak.upgrade().is_none());
  }
}
