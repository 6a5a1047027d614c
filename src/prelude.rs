//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Bindings
pub use crate::binding::{Clicks, TextChanges};
// Errors
pub use crate::error::RxError;
// Core traits and creation
pub use crate::observable::{self, Observable, ObservableEmitter, ObservableExt};
// Observer trait
pub use crate::observer::{Notification, Observer, ObserverAll};
// Boxed observable
pub use crate::ops::box_it::BoxObservable;
// Default Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::{PoolScheduler, SerialQueue};
// Scheduler Core types
pub use crate::scheduler::{ManualScheduler, Scheduler, TaskHandle};
// Subject
pub use crate::subject::*;
// Subscription
pub use crate::subscription::{CompositeDisposable, Disposable, Subscription, SubscriptionGuard};
