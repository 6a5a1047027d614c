use std::collections::VecDeque;

use futures::future::AbortHandle;

use super::{Scheduler, TaskHandle};
use crate::rc::MutArc;

type Task = Box<dyn FnOnce() + Send>;

/// A FIFO task queue that runs only when the host pumps it.
///
/// Hosts that own their event loop call [`ManualScheduler::run_pending`]
/// from the UI thread; tests use it to make scheduler hops deterministic.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  queue: MutArc<VecDeque<(AbortHandle, Task)>>,
}

impl ManualScheduler {
  pub fn new() -> Self { Self::default() }

  /// Runs queued tasks on the calling thread, including tasks queued while
  /// draining, until the queue is empty. Returns how many tasks ran.
  pub fn run_pending(&self) -> usize {
    let mut ran = 0;
    loop {
      let next = self.queue.rc_deref_mut().pop_front();
      match next {
        Some((handle, task)) => {
          if !handle.is_aborted() {
            task();
            ran += 1;
          }
        }
        None => return ran,
      }
    }
  }

  /// Number of tasks waiting, disposed ones included.
  pub fn pending(&self) -> usize { self.queue.rc_deref().len() }
}

impl Scheduler for ManualScheduler {
  fn schedule<F>(&self, task: F) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    let (handle, _) = AbortHandle::new_pair();
    log::trace!("queueing task on the manual scheduler");
    self.queue.rc_deref_mut().push_back((handle.clone(), Box::new(task)));
    TaskHandle::new(handle)
  }
}

impl std::fmt::Debug for ManualScheduler {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ManualScheduler").field("pending", &self.pending()).finish()
  }
}
