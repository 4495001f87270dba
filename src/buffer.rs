//! The bounded FIFO buffer at the heart of the crate.
//!
//! One mutex guards the queue state; two condition variables split the wait
//! roles so a state transition only wakes threads that can make progress:
//! producers park on `not_full`, consumers park on `not_empty`. Every wait
//! re-checks its predicate in a loop, so spurious wakeups are harmless.

use crate::error::{
  CloseError, PutError, TakeError, TakeErrorTimeout, TryPutError, TryTakeError,
};

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Queue state protected by the buffer's single mutex.
struct Inner<T> {
  queue: VecDeque<T>,
  closed: bool,
}

/// A bounded, thread-safe FIFO buffer shared between producer and consumer
/// threads.
///
/// `put` blocks while the buffer is full and `take` blocks while it is
/// empty, which gives natural backpressure: producers can never outrun
/// consumers by more than `capacity` items. Items leave in exactly the
/// order they were physically appended. With several producers the append
/// interleaving is decided by the scheduler and is not part of the
/// contract; only FIFO over the buffer's contents is guaranteed.
///
/// The buffer is typically wrapped in an [`Arc`](std::sync::Arc) and handed
/// to any number of producer and consumer threads.
///
/// Blocking is unbounded by default. [`close`](BoundedBuffer::close) turns
/// every blocked and future `put`/`take` into a distinguishable closed
/// signal instead of waiting forever.
pub struct BoundedBuffer<T> {
  inner: Mutex<Inner<T>>,
  not_full: Condvar,
  not_empty: Condvar,
  capacity: usize,
}

impl<T> BoundedBuffer<T> {
  /// Creates a buffer that holds at most `capacity` items.
  ///
  /// # Panics
  ///
  /// Panics if `capacity` is zero. A zero-capacity buffer could never
  /// accept an item, so this is rejected at construction rather than
  /// silently clamped.
  pub fn new(capacity: usize) -> Self {
    assert!(capacity > 0, "BoundedBuffer capacity must be at least 1");
    Self {
      inner: Mutex::new(Inner {
        queue: VecDeque::with_capacity(capacity),
        closed: false,
      }),
      not_full: Condvar::new(),
      not_empty: Condvar::new(),
      capacity,
    }
  }

  /// Appends `item` at the tail, blocking while the buffer is full.
  ///
  /// The calling thread parks on the "not full" condition and re-checks
  /// the capacity predicate on every wakeup. On success exactly one
  /// blocked taker is woken.
  ///
  /// # Errors
  ///
  /// - `Err(PutError::Closed(item))` if the buffer is closed, whether
  ///   before the call or while blocked. The item is handed back.
  pub fn put(&self, item: T) -> Result<(), PutError<T>> {
    let mut inner = self.inner.lock();
    while inner.queue.len() == self.capacity {
      if inner.closed {
        return Err(PutError::Closed(item));
      }
      self.not_full.wait(&mut inner);
    }
    if inner.closed {
      return Err(PutError::Closed(item));
    }
    inner.queue.push_back(item);
    drop(inner);
    self.not_empty.notify_one();
    Ok(())
  }

  /// Attempts to append `item` without blocking.
  ///
  /// # Errors
  ///
  /// - `Err(TryPutError::Full(item))` if the buffer is at capacity.
  /// - `Err(TryPutError::Closed(item))` if the buffer is closed.
  pub fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
    let mut inner = self.inner.lock();
    if inner.closed {
      return Err(TryPutError::Closed(item));
    }
    if inner.queue.len() == self.capacity {
      return Err(TryPutError::Full(item));
    }
    inner.queue.push_back(item);
    drop(inner);
    self.not_empty.notify_one();
    Ok(())
  }

  /// Removes and returns the head item, blocking while the buffer is empty.
  ///
  /// The calling thread parks on the "not empty" condition and re-checks
  /// the emptiness predicate on every wakeup. On success exactly one
  /// blocked putter is woken.
  ///
  /// A closed buffer still hands out its backlog: items already accepted
  /// are drained in FIFO order before the closed signal is reported.
  ///
  /// # Errors
  ///
  /// - `Err(TakeError::Closed)` if the buffer is empty and closed.
  pub fn take(&self) -> Result<T, TakeError> {
    let mut inner = self.inner.lock();
    loop {
      if let Some(item) = inner.queue.pop_front() {
        drop(inner);
        self.not_full.notify_one();
        return Ok(item);
      }
      if inner.closed {
        return Err(TakeError::Closed);
      }
      self.not_empty.wait(&mut inner);
    }
  }

  /// Attempts to remove the head item without blocking.
  ///
  /// # Errors
  ///
  /// - `Err(TryTakeError::Empty)` if the buffer holds no items.
  /// - `Err(TryTakeError::Closed)` if the buffer is empty and closed.
  pub fn try_take(&self) -> Result<T, TryTakeError> {
    let mut inner = self.inner.lock();
    match inner.queue.pop_front() {
      Some(item) => {
        drop(inner);
        self.not_full.notify_one();
        Ok(item)
      }
      None if inner.closed => Err(TryTakeError::Closed),
      None => Err(TryTakeError::Empty),
    }
  }

  /// Like [`take`](BoundedBuffer::take), but gives up once `timeout` has
  /// elapsed without an item becoming available.
  ///
  /// # Errors
  ///
  /// - `Err(TakeErrorTimeout::Closed)` if the buffer is empty and closed.
  /// - `Err(TakeErrorTimeout::Timeout)` if the deadline passed first.
  pub fn take_timeout(&self, timeout: Duration) -> Result<T, TakeErrorTimeout> {
    let deadline = Instant::now() + timeout;
    let mut inner = self.inner.lock();
    loop {
      if let Some(item) = inner.queue.pop_front() {
        drop(inner);
        self.not_full.notify_one();
        return Ok(item);
      }
      if inner.closed {
        return Err(TakeErrorTimeout::Closed);
      }
      if self.not_empty.wait_until(&mut inner, deadline).timed_out() {
        // Deadline reached. One final pop attempt: an item may have been
        // appended between the timeout firing and us re-acquiring the lock.
        return match inner.queue.pop_front() {
          Some(item) => {
            drop(inner);
            self.not_full.notify_one();
            Ok(item)
          }
          None if inner.closed => Err(TakeErrorTimeout::Closed),
          None => Err(TakeErrorTimeout::Timeout),
        };
      }
    }
  }

  /// Closes the buffer.
  ///
  /// Every blocked and future `put` fails with the closed signal; `take`
  /// drains the remaining backlog and then reports closed. Both condition
  /// variables are woken wholesale so no waiter sleeps through the
  /// transition.
  ///
  /// # Errors
  ///
  /// - `Err(CloseError)` if the buffer was already closed.
  pub fn close(&self) -> Result<(), CloseError> {
    let mut inner = self.inner.lock();
    if inner.closed {
      return Err(CloseError);
    }
    inner.closed = true;
    drop(inner);
    self.not_full.notify_all();
    self.not_empty.notify_all();
    Ok(())
  }

  /// Returns the number of items currently buffered.
  ///
  /// The count is taken under the same mutex as `put`/`take`, so it is a
  /// consistent point-in-time snapshot, but it may be stale the moment it
  /// is returned if other threads are active.
  pub fn len(&self) -> usize {
    self.inner.lock().queue.len()
  }

  /// Returns `true` if the buffer currently holds no items.
  pub fn is_empty(&self) -> bool {
    self.inner.lock().queue.is_empty()
  }

  /// Returns `true` if the buffer is currently at capacity.
  pub fn is_full(&self) -> bool {
    self.inner.lock().queue.len() == self.capacity
  }

  /// Returns the fixed capacity bound the buffer was created with.
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns `true` if [`close`](BoundedBuffer::close) has been called.
  pub fn is_closed(&self) -> bool {
    self.inner.lock().closed
  }
}

impl<T> fmt::Debug for BoundedBuffer<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let inner = self.inner.lock();
    f.debug_struct("BoundedBuffer")
      .field("len", &inner.queue.len())
      .field("capacity", &self.capacity)
      .field("closed", &inner.closed)
      .finish()
  }
}
