//! Bounded, thread-safe producer/consumer buffering for Rust.
//!
//! Conveyor provides a generic fixed-capacity FIFO buffer with blocking
//! `put`/`take` semantics (the classic bounded-buffer primitive) and a pair
//! of worker types for running producer/consumer pipelines over it on OS
//! threads. A full producer blocks until a consumer makes room, giving
//! natural backpressure without drops or duplication.

pub mod buffer;
pub mod error;
pub mod worker;

// Public re-exports for convenience
pub use buffer::BoundedBuffer;
pub use error::{
  CloseError, PutError, TakeError, TakeErrorTimeout, TryPutError, TryTakeError,
};
pub use worker::{
  ConsumerHandle, ConsumerWorker, ProducerHandle, ProducerWorker, WorkerOutcome, WorkerReport,
};
