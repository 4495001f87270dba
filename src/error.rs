use core::fmt;

/// Error returned by `try_put` when the item could not be accepted
/// immediately. The rejected item is handed back to the caller.
#[derive(PartialEq, Eq, Clone)]
pub enum TryPutError<T> {
  /// The buffer is at capacity and cannot accept more items right now.
  Full(T),
  /// The buffer has been closed and accepts no further items.
  Closed(T),
}

impl<T> TryPutError<T> {
  /// Consumes the error, returning the item that was not accepted.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      TryPutError::Full(item) | TryPutError::Closed(item) => item,
    }
  }
}

impl<T> fmt::Debug for TryPutError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryPutError::Full(_) => write!(f, "TryPutError::Full(..)"),
      TryPutError::Closed(_) => write!(f, "TryPutError::Closed(..)"),
    }
  }
}

impl<T> fmt::Display for TryPutError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryPutError::Full(_) => f.write_str("buffer full"),
      TryPutError::Closed(_) => f.write_str("buffer closed"),
    }
  }
}

impl<T: fmt::Debug> std::error::Error for TryPutError<T> {}

/// Error returned by blocking `put` operations. The only failure mode is
/// closure; the undelivered item is handed back to the caller.
#[derive(PartialEq, Eq, Clone)]
pub enum PutError<T> {
  /// The buffer was closed while the item was pending.
  Closed(T),
}

impl<T> PutError<T> {
  /// Consumes the error, returning the item that was not delivered.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      PutError::Closed(item) => item,
    }
  }
}

impl<T> fmt::Debug for PutError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PutError::Closed(_) => write!(f, "PutError::Closed(..)"),
    }
  }
}

impl<T> fmt::Display for PutError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PutError::Closed(_) => f.write_str("buffer closed"),
    }
  }
}

impl<T: fmt::Debug> std::error::Error for PutError<T> {}

/// Error returned by `try_take` when an item could not be removed
/// immediately.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TryTakeError {
  /// The buffer holds no items right now.
  Empty,
  /// The buffer is empty and closed; no further items will arrive.
  Closed,
}

impl std::error::Error for TryTakeError {}
impl fmt::Display for TryTakeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryTakeError::Empty => f.write_str("buffer empty"),
      TryTakeError::Closed => f.write_str("buffer closed (empty and closed)"),
    }
  }
}

/// Error returned by blocking `take` operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TakeError {
  /// The buffer is empty and closed; no further items will arrive.
  Closed,
}

impl std::error::Error for TakeError {}
impl fmt::Display for TakeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TakeError::Closed => f.write_str("buffer closed (empty and closed)"),
    }
  }
}

/// Error returned by `take_timeout` operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TakeErrorTimeout {
  /// The buffer is empty and closed; no further items will arrive.
  Closed,
  /// The timeout elapsed before an item became available.
  Timeout,
}

impl std::error::Error for TakeErrorTimeout {}
impl fmt::Display for TakeErrorTimeout {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TakeErrorTimeout::Closed => f.write_str("buffer closed"),
      TakeErrorTimeout::Timeout => f.write_str("take operation timed out"),
    }
  }
}

/// Error returned when attempting to close an already closed buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CloseError;

impl std::error::Error for CloseError {}
impl fmt::Display for CloseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("buffer is already closed")
  }
}
