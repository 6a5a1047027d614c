//! Adapters turning UI widget events into ordinary observables.
//!
//! The host toolkit calls the push side (`set_text`, `click`) from its event
//! handlers; the rest of the application only ever sees the observable side.

use crate::{
  error::RxError,
  observable::Observable,
  subject::{BehaviorSubject, PublishSubject},
};

/// Text field changes: one event per edit carrying the full current text.
///
/// A new subscriber receives the current text right away, then every later
/// edit.
#[derive(Clone)]
pub struct TextChanges(BehaviorSubject<String>);

impl TextChanges {
  pub fn new(initial: impl Into<String>) -> Self { TextChanges(BehaviorSubject::with_value(initial.into())) }

  /// Records an edit. Called by the host on every keystroke.
  pub fn set_text(&self, text: impl Into<String>) { self.0.next(text.into()) }

  /// The current text. Also usable from inside a `changes()` callback.
  pub fn text(&self) -> String { self.0.value().unwrap_or_default() }

  pub fn changes(&self) -> impl Observable<Item = String, Err = RxError> + Clone + Send + 'static {
    self.0.clone()
  }

  /// Completes the stream, e.g. when the widget is destroyed.
  pub fn close(&self) { self.0.complete() }
}

impl Default for TextChanges {
  fn default() -> Self { Self::new(String::new()) }
}

/// Button taps: one `()` per tap, delivered to the observers attached at the
/// moment of the tap.
#[derive(Clone, Default)]
pub struct Clicks(PublishSubject<()>);

impl Clicks {
  pub fn new() -> Self { Self::default() }

  /// Records a tap. Called by the host from its click handler.
  pub fn click(&self) { self.0.next(()) }

  pub fn clicks(&self) -> impl Observable<Item = (), Err = RxError> + Clone + Send + 'static { self.0.clone() }

  pub fn close(&self) { self.0.complete() }
}
