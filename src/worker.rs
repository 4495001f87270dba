//! Producer and consumer workers.
//!
//! A worker is plain configuration plus a run-to-completion body spawned
//! onto its own named OS thread. Failures stay local: a worker that hits
//! the buffer's closed signal (or panics) terminates itself, logs, and
//! surfaces a FAILED report through its handle without disturbing sibling
//! workers or the buffer. The driver joins every handle and compares
//! expected vs. actual counts to detect partial failure.

use crate::buffer::BoundedBuffer;
use crate::error::{PutError, TakeError};

use log::{debug, trace, warn};
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Terminal state of a worker: `CREATED -> RUNNING -> {COMPLETED | FAILED}`.
///
/// CREATED is the constructed-but-unspawned struct and RUNNING is the live
/// thread; only the terminal states are observable through a report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WorkerOutcome {
  /// The worker ran its full transfer count.
  Completed,
  /// The worker stopped early (buffer closed underneath it, or it panicked).
  Failed,
}

/// What a worker accomplished, reported once at join time.
#[derive(Debug, Clone)]
pub struct WorkerReport {
  /// The worker's configured name (also its thread name).
  pub name: String,
  /// Items actually moved through the buffer by this worker.
  pub transferred: usize,
  /// Terminal state.
  pub outcome: WorkerOutcome,
}

impl WorkerReport {
  /// Returns `true` if the worker ran to completion.
  pub fn is_completed(&self) -> bool {
    self.outcome == WorkerOutcome::Completed
  }
}

/// A producer: drains a finite source into the shared buffer, one item at a
/// time, pacing itself with `delay` between puts.
pub struct ProducerWorker<T> {
  name: String,
  source: Vec<T>,
  buffer: Arc<BoundedBuffer<T>>,
  delay: Duration,
}

impl<T: Send + 'static> ProducerWorker<T> {
  /// Configures a producer. Nothing runs until [`spawn`](Self::spawn).
  pub fn new(
    name: impl Into<String>,
    source: Vec<T>,
    buffer: Arc<BoundedBuffer<T>>,
    delay: Duration,
  ) -> Self {
    Self {
      name: name.into(),
      source,
      buffer,
      delay,
    }
  }

  /// Spawns the producer onto its own named thread.
  ///
  /// # Errors
  ///
  /// Returns the OS error if the thread could not be created.
  pub fn spawn(self) -> io::Result<ProducerHandle> {
    let name = self.name.clone();
    let handle = thread::Builder::new()
      .name(name.clone())
      .spawn(move || self.run())?;
    Ok(ProducerHandle { name, handle })
  }

  fn run(self) -> WorkerReport {
    let ProducerWorker {
      name,
      source,
      buffer,
      delay,
    } = self;
    let total = source.len();
    let mut delivered = 0;
    for item in source {
      match buffer.put(item) {
        Ok(()) => {
          delivered += 1;
          trace!("{name}: produced item {delivered}/{total}");
        }
        Err(PutError::Closed(_)) => {
          warn!("{name}: buffer closed after {delivered}/{total} items, stopping");
          return WorkerReport {
            name,
            transferred: delivered,
            outcome: WorkerOutcome::Failed,
          };
        }
      }
      if !delay.is_zero() {
        thread::sleep(delay);
      }
    }
    debug!("{name}: finished producing {delivered} items");
    WorkerReport {
      name,
      transferred: delivered,
      outcome: WorkerOutcome::Completed,
    }
  }
}

impl<T> fmt::Debug for ProducerWorker<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProducerWorker")
      .field("name", &self.name)
      .field("source_len", &self.source.len())
      .field("delay", &self.delay)
      .finish_non_exhaustive()
  }
}

/// Join handle for a spawned [`ProducerWorker`].
#[derive(Debug)]
pub struct ProducerHandle {
  name: String,
  handle: JoinHandle<WorkerReport>,
}

impl ProducerHandle {
  /// Blocks until the producer terminates and returns its report.
  ///
  /// A panicked worker thread is reported as FAILED rather than propagating
  /// the panic into the caller.
  pub fn join(self) -> WorkerReport {
    match self.handle.join() {
      Ok(report) => report,
      Err(_) => {
        warn!("{}: worker thread panicked", self.name);
        WorkerReport {
          name: self.name,
          transferred: 0,
          outcome: WorkerOutcome::Failed,
        }
      }
    }
  }

  /// Returns `true` once the worker thread has terminated.
  pub fn is_finished(&self) -> bool {
    self.handle.is_finished()
  }
}

/// A consumer: pulls exactly `items_to_consume` items from the shared buffer
/// into an exclusively-owned destination, pacing itself with `delay` between
/// takes. The destination comes back through the handle at join time.
pub struct ConsumerWorker<T> {
  name: String,
  buffer: Arc<BoundedBuffer<T>>,
  items_to_consume: usize,
  delay: Duration,
}

impl<T: Send + 'static> ConsumerWorker<T> {
  /// Configures a consumer. Nothing runs until [`spawn`](Self::spawn).
  ///
  /// The count is fixed here; the consumer terminates after exactly that
  /// many takes regardless of how much data producers still hold.
  pub fn new(
    name: impl Into<String>,
    buffer: Arc<BoundedBuffer<T>>,
    items_to_consume: usize,
    delay: Duration,
  ) -> Self {
    Self {
      name: name.into(),
      buffer,
      items_to_consume,
      delay,
    }
  }

  /// Spawns the consumer onto its own named thread.
  ///
  /// # Errors
  ///
  /// Returns the OS error if the thread could not be created.
  pub fn spawn(self) -> io::Result<ConsumerHandle<T>> {
    let name = self.name.clone();
    let handle = thread::Builder::new()
      .name(name.clone())
      .spawn(move || self.run())?;
    Ok(ConsumerHandle { name, handle })
  }

  fn run(self) -> (WorkerReport, Vec<T>) {
    let ConsumerWorker {
      name,
      buffer,
      items_to_consume,
      delay,
    } = self;
    let mut destination = Vec::with_capacity(items_to_consume);
    while destination.len() < items_to_consume {
      match buffer.take() {
        Ok(item) => {
          destination.push(item);
          trace!(
            "{name}: consumed item {}/{items_to_consume}",
            destination.len()
          );
        }
        Err(TakeError::Closed) => {
          warn!(
            "{name}: buffer closed after {}/{items_to_consume} items, stopping",
            destination.len()
          );
          let report = WorkerReport {
            name,
            transferred: destination.len(),
            outcome: WorkerOutcome::Failed,
          };
          return (report, destination);
        }
      }
      if !delay.is_zero() {
        thread::sleep(delay);
      }
    }
    debug!("{name}: finished consuming {items_to_consume} items");
    let report = WorkerReport {
      name,
      transferred: destination.len(),
      outcome: WorkerOutcome::Completed,
    };
    (report, destination)
  }
}

impl<T> fmt::Debug for ConsumerWorker<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConsumerWorker")
      .field("name", &self.name)
      .field("items_to_consume", &self.items_to_consume)
      .field("delay", &self.delay)
      .finish_non_exhaustive()
  }
}

/// Join handle for a spawned [`ConsumerWorker`]. Yields the report together
/// with the destination sequence, in arrival order.
#[derive(Debug)]
pub struct ConsumerHandle<T> {
  name: String,
  handle: JoinHandle<(WorkerReport, Vec<T>)>,
}

impl<T> ConsumerHandle<T> {
  /// Blocks until the consumer terminates and returns its report plus the
  /// items it collected.
  ///
  /// A panicked worker thread is reported as FAILED with an empty
  /// destination rather than propagating the panic into the caller.
  pub fn join(self) -> (WorkerReport, Vec<T>) {
    match self.handle.join() {
      Ok(result) => result,
      Err(_) => {
        warn!("{}: worker thread panicked", self.name);
        let report = WorkerReport {
          name: self.name,
          transferred: 0,
          outcome: WorkerOutcome::Failed,
        };
        (report, Vec::new())
      }
    }
  }

  /// Returns `true` once the worker thread has terminated.
  pub fn is_finished(&self) -> bool {
    self.handle.is_finished()
  }
}
