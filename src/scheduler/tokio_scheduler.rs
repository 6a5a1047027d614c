use futures::future::{self, abortable};
use tokio::runtime::Handle;

use super::{Scheduler, TaskHandle};

impl Scheduler for Handle {
  fn schedule<F>(&self, task: F) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    let (fut, handle) = abortable(future::lazy(move |_| task()));
    log::trace!("dispatching task to the tokio runtime");
    self.spawn(fut);
    TaskHandle::new(handle)
  }
}
