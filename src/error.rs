use std::{borrow::Cow, error::Error as StdError, sync::Arc};

/// The error type carried by the built-in sources.
///
/// Subjects hand the same error to every attached observer, so `RxError` is
/// cheap to clone: wrapped errors sit behind an `Arc`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RxError {
  #[error("{0}")]
  Message(Cow<'static, str>),
  #[error("{0}")]
  Source(Arc<dyn StdError + Send + Sync>),
  #[error("failed to start scheduler: {0}")]
  Scheduler(Arc<std::io::Error>),
}

impl RxError {
  pub fn msg(message: impl Into<Cow<'static, str>>) -> Self { RxError::Message(message.into()) }

  pub fn from_error<E>(err: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    RxError::Source(Arc::new(err))
  }
}

impl From<std::io::Error> for RxError {
  fn from(err: std::io::Error) -> Self { RxError::Scheduler(Arc::new(err)) }
}
