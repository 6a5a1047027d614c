//! Execution contexts used by `subscribe_on` and `observe_on`.
//!
//! A [`Scheduler`] runs `FnOnce` tasks somewhere else: on a worker pool
//! ([`PoolScheduler`]), on one dedicated FIFO thread standing in for the UI
//! thread ([`SerialQueue`]), or on whatever thread pumps a
//! [`ManualScheduler`].

use futures::future::AbortHandle;

use crate::subscription::Disposable;

#[cfg(feature = "futures-scheduler")]
mod thread_pool_scheduler;
#[cfg(feature = "futures-scheduler")]
pub use thread_pool_scheduler::{PoolScheduler, SerialQueue};
mod manual_scheduler;
pub use manual_scheduler::ManualScheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

/// A Scheduler is an object to order tasks and schedule their execution.
pub trait Scheduler: Clone + Send + Sync + 'static {
  /// Queues `task` for execution. Disposing the returned handle before the
  /// task starts prevents it from running; a task already running is not
  /// interrupted.
  fn schedule<F>(&self, task: F) -> TaskHandle
  where
    F: FnOnce() + Send + 'static;
}

/// Cancellation handle of one scheduled task.
#[derive(Clone, Debug)]
pub struct TaskHandle(AbortHandle);

impl TaskHandle {
  pub(crate) fn new(handle: AbortHandle) -> Self { TaskHandle(handle) }
}

impl Disposable for TaskHandle {
  #[inline]
  fn dispose(&self) { self.0.abort() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_aborted() }
}
