/// Implements the callbacks an operator observer passes through untouched:
/// `on_subscribe`, and optionally `error` and `complete`.
macro_rules! forward_observer {
  (on_subscribe) => {
    #[inline]
    fn on_subscribe(&mut self, subscription: $crate::subscription::Subscription) {
      self.observer.on_subscribe(subscription)
    }
  };
  (on_subscribe, error, complete) => {
    forward_observer!(on_subscribe);

    #[inline]
    fn error(&mut self, err: Err) { self.observer.error(err) }

    #[inline]
    fn complete(&mut self) { self.observer.complete() }
  };
}

pub mod box_it;
pub mod buffer;
pub mod distinct;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod observe_on;
pub mod skip;
pub mod subscribe_on;
