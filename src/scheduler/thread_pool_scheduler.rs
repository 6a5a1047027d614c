use futures::{
  executor::ThreadPool,
  future::{self, abortable},
};
use once_cell::sync::Lazy;

use super::{Scheduler, TaskHandle};
use crate::error::RxError;

static IO_POOL: Lazy<PoolScheduler> = Lazy::new(|| {
  let pool = ThreadPool::builder()
    .name_prefix("rxpush-io-")
    .create()
    .expect("failed to start the shared io thread pool");
  PoolScheduler(pool)
});

fn spawn_on<F>(pool: &ThreadPool, task: F) -> TaskHandle
where
  F: FnOnce() + Send + 'static,
{
  let (fut, handle) = abortable(future::lazy(move |_| task()));
  pool.spawn_ok(async move {
    // `Err(Aborted)` only means the task was disposed before it started.
    let _ = fut.await;
  });
  TaskHandle::new(handle)
}

/// A multi-worker background pool, where `subscribe_on` usually sends
/// producer work.
///
/// Tasks may run in parallel and in any order.
#[derive(Clone)]
pub struct PoolScheduler(ThreadPool);

impl PoolScheduler {
  /// Builds a pool with `size` worker threads.
  pub fn new(size: usize) -> Result<Self, RxError> {
    if size == 0 {
      return Err(RxError::msg("a thread pool needs at least one worker"));
    }
    let pool = ThreadPool::builder().pool_size(size).name_prefix("rxpush-pool-").create()?;
    Ok(PoolScheduler(pool))
  }

  /// The process-wide pool, sized to the number of CPUs and started on
  /// first use.
  pub fn io() -> Self { IO_POOL.clone() }
}

impl Scheduler for PoolScheduler {
  fn schedule<F>(&self, task: F) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    log::trace!("dispatching task to the worker pool");
    spawn_on(&self.0, task)
  }
}

/// One dedicated thread executing tasks strictly in submission order.
///
/// This is the UI-affinity context: every callback delivered through
/// `observe_on(queue)` runs on the same named thread, one at a time.
#[derive(Clone)]
pub struct SerialQueue(ThreadPool);

impl SerialQueue {
  /// Starts the queue thread. Its name begins with `name`.
  pub fn new(name: &str) -> Result<Self, RxError> {
    let pool = ThreadPool::builder().pool_size(1).name_prefix(format!("{name}-")).create()?;
    Ok(SerialQueue(pool))
  }
}

impl Scheduler for SerialQueue {
  fn schedule<F>(&self, task: F) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    log::trace!("dispatching task to the serial queue");
    spawn_on(&self.0, task)
  }
}

#[cfg(test)]
mod test {
  use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
  };

  use super::*;
  use crate::subscription::Disposable;

  fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
      if cond() {
        return;
      }
      thread::sleep(Duration::from_millis(5));
    }
  }

  #[test]
  fn serial_queue_is_fifo_on_one_thread() {
    let queue = SerialQueue::new("fifo").unwrap();
    let seen = Arc::new(Mutex::new(vec![]));
    for i in 0..100 {
      let c_seen = seen.clone();
      queue.schedule(move || {
        let name = thread::current().name().map(str::to_owned);
        c_seen.lock().unwrap().push((i, name));
      });
    }
    wait_until(|| seen.lock().unwrap().len() == 100);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.iter().map(|(i, _)| *i).collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
    assert!(seen.iter().all(|(_, name)| name.as_deref() == Some("fifo-0")));
  }

  #[test]
  fn disposed_task_never_runs() {
    let queue = SerialQueue::new("gate").unwrap();
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let ran = Arc::new(Mutex::new(false));
    let c_ran = ran.clone();

    // Occupy the only thread until the second task is disposed.
    queue.schedule(move || {
      let _ = rx.recv();
    });
    let handle = queue.schedule(move || *c_ran.lock().unwrap() = true);
    handle.dispose();
    assert!(handle.is_disposed());
    let _ = tx.send(());

    let done = Arc::new(Mutex::new(false));
    let c_done = done.clone();
    queue.schedule(move || *c_done.lock().unwrap() = true);
    wait_until(|| *done.lock().unwrap());
    assert!(!*ran.lock().unwrap());
  }

  #[test]
  fn zero_sized_pool_is_an_error() { assert!(PoolScheduler::new(0).is_err()); }

  #[test]
  fn io_pool_is_shared() {
    let ran = Arc::new(Mutex::new(0));
    for _ in 0..4 {
      let c_ran = ran.clone();
      PoolScheduler::io().schedule(move || *c_ran.lock().unwrap() += 1);
    }
    wait_until(|| *ran.lock().unwrap() == 4);
    assert_eq!(*ran.lock().unwrap(), 4);
  }
}
