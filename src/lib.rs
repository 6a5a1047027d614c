//! # rxpush: push-based reactive streams
//!
//! Observables produce values, observers consume them, subjects do both and
//! fan out to many observers, and schedulers decide which thread does the
//! work.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxpush::prelude::*;
//!
//! observable::range(1, 10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 10)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A cold, re-runnable description of a value sequence |
//! | [`Observer`] | Consumes `on_subscribe`, `next`, `error` and `complete` |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`CompositeDisposable`] | A bag of subscriptions released together |
//! | [`subject`] | Publish, behavior, async and replay multicasting |
//! | [`Scheduler`] | Where subscription work runs and where events land |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): thread-pool and serial-queue
//!   schedulers backed by `futures::executor::ThreadPool`
//! - **`tokio-scheduler`**: lets a tokio runtime handle act as a scheduler
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`CompositeDisposable`]: subscription::CompositeDisposable
//! [`Scheduler`]: scheduler::Scheduler

pub mod binding;
pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;

#[cfg(doctest)]
mod __readme_doctest {
  #![doc = include_str!("../README.md")]
}
