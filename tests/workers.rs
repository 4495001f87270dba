mod common;
use common::*;

use conveyor::{BoundedBuffer, ConsumerWorker, ProducerWorker};

use serial_test::serial;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn single_producer_single_consumer_preserves_order() {
  let buffer = Arc::new(BoundedBuffer::new(2));
  let source = vec![1, 2, 3, 4, 5];

  let producer = ProducerWorker::new("producer-1", source.clone(), buffer.clone(), Duration::ZERO)
    .spawn()
    .unwrap();
  let consumer = ConsumerWorker::new("consumer-1", buffer.clone(), source.len(), Duration::ZERO)
    .spawn()
    .unwrap();

  let produced = producer.join();
  let (consumed, destination) = consumer.join();

  assert!(produced.is_completed());
  assert_eq!(produced.transferred, source.len());
  assert!(consumed.is_completed());
  assert_eq!(destination, source);
  assert_eq!(buffer.len(), 0);
}

#[test]
fn paced_workers_transfer_everything() {
  // Producer outpaces the consumer, so the small buffer repeatedly fills
  // and backpressure does the throttling.
  let buffer = Arc::new(BoundedBuffer::new(3));
  let source: Vec<usize> = (0..20).collect();

  let producer = ProducerWorker::new(
    "producer-1",
    source.clone(),
    buffer.clone(),
    Duration::from_millis(1),
  )
  .spawn()
  .unwrap();
  let consumer = ConsumerWorker::new("consumer-1", buffer.clone(), source.len(), SHORT_DELAY)
    .spawn()
    .unwrap();

  let produced = producer.join();
  let (consumed, destination) = consumer.join();

  assert!(produced.is_completed());
  assert!(consumed.is_completed());
  assert_eq!(destination, source);
}

#[test]
fn multi_producer_multi_consumer_conservation() {
  let buffer = Arc::new(BoundedBuffer::new(4));
  let source_a: Vec<String> = (1..=ITEMS_LOW).map(|i| format!("A{i}")).collect();
  let source_b: Vec<String> = (1..=ITEMS_LOW).map(|i| format!("B{i}")).collect();
  let total = source_a.len() + source_b.len();

  let producer_a =
    ProducerWorker::new("producer-a", source_a.clone(), buffer.clone(), Duration::ZERO)
      .spawn()
      .unwrap();
  let producer_b =
    ProducerWorker::new("producer-b", source_b.clone(), buffer.clone(), Duration::ZERO)
      .spawn()
      .unwrap();
  let consumer_1 = ConsumerWorker::new("consumer-1", buffer.clone(), total / 2, Duration::ZERO)
    .spawn()
    .unwrap();
  let consumer_2 = ConsumerWorker::new("consumer-2", buffer.clone(), total / 2, Duration::ZERO)
    .spawn()
    .unwrap();

  assert!(producer_a.join().is_completed());
  assert!(producer_b.join().is_completed());
  let (report_1, dest_1) = consumer_1.join();
  let (report_2, dest_2) = consumer_2.join();
  assert!(report_1.is_completed());
  assert!(report_2.is_completed());

  // No loss, no duplication: the landed multiset equals the union of the
  // sources. Interleaving across producers is left to the scheduler.
  let mut landed: Vec<String> = dest_1.into_iter().chain(dest_2).collect();
  assert_eq!(landed.len(), total);
  landed.sort();
  let mut expected: Vec<String> = source_a.into_iter().chain(source_b).collect();
  expected.sort();
  assert_eq!(landed, expected);
  assert_eq!(buffer.len(), 0);
}

#[test]
fn consumer_stops_at_its_fixed_count() {
  let buffer = Arc::new(BoundedBuffer::new(10));
  let source: Vec<u32> = (1..=10).collect();

  let producer = ProducerWorker::new("producer-1", source, buffer.clone(), Duration::ZERO)
    .spawn()
    .unwrap();
  let consumer = ConsumerWorker::new("consumer-1", buffer.clone(), 4, Duration::ZERO)
    .spawn()
    .unwrap();

  assert!(producer.join().is_completed());
  let (report, destination) = consumer.join();

  assert!(report.is_completed());
  assert_eq!(destination, vec![1, 2, 3, 4]);
  // The count is fixed at construction; the rest stays in the buffer.
  assert_eq!(buffer.len(), 6);
}

#[test]
#[serial]
fn closing_the_buffer_fails_workers_in_isolation() {
  let buffer = Arc::new(BoundedBuffer::new(2));
  let source: Vec<usize> = (0..ITEMS_MEDIUM).collect();

  let producer = ProducerWorker::new("producer-1", source, buffer.clone(), Duration::ZERO)
    .spawn()
    .unwrap();
  let consumer = ConsumerWorker::new("consumer-1", buffer.clone(), ITEMS_MEDIUM, SHORT_DELAY)
    .spawn()
    .unwrap();

  // Let a handful of items through, then pull the plug while the producer
  // is blocked on the full buffer.
  thread::sleep(BLOCK_GRACE);
  buffer.close().unwrap();

  let produced = producer.join();
  let (consumed, destination) = consumer.join();

  assert!(!produced.is_completed());
  assert!(produced.transferred < ITEMS_MEDIUM);
  assert!(!consumed.is_completed());

  // The consumer drains the accepted backlog before seeing the closed
  // signal, so everything the producer delivered is retained, in order.
  assert_eq!(consumed.transferred, produced.transferred);
  let expected: Vec<usize> = (0..produced.transferred).collect();
  assert_eq!(destination, expected);
  assert_eq!(buffer.len(), 0);
}
