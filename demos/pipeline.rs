// demos/pipeline.rs
//
// Walkthrough of the two classic bounded-buffer scenarios: a single
// producer/consumer pair, then two of each sharing one buffer.
// Run with: cargo run --example pipeline

use conveyor::{BoundedBuffer, ConsumerWorker, ProducerWorker};
use std::sync::Arc;
use std::time::Duration;

fn main() {
  println!("--- Single producer, single consumer ---");
  {
    let source: Vec<u32> = (1..=10).collect();
    let buffer = Arc::new(BoundedBuffer::new(3));

    let producer = ProducerWorker::new(
      "producer-1",
      source.clone(),
      buffer.clone(),
      Duration::from_millis(100),
    )
    .spawn()
    .expect("failed to spawn producer");
    let consumer = ConsumerWorker::new(
      "consumer-1",
      buffer.clone(),
      source.len(),
      Duration::from_millis(150),
    )
    .spawn()
    .expect("failed to spawn consumer");

    let produced = producer.join();
    let (consumed, destination) = consumer.join();

    println!("source size:       {}", source.len());
    println!("destination size:  {}", destination.len());
    println!("destination:       {:?}", destination);
    println!(
      "all transferred:   {}",
      produced.is_completed() && consumed.is_completed() && destination == source
    );
  }

  println!();
  println!("--- Two producers, two consumers ---");
  {
    let source_a = vec!["A1", "A2", "A3", "A4", "A5"];
    let source_b = vec!["B1", "B2", "B3", "B4", "B5"];
    let total = source_a.len() + source_b.len();
    let buffer = Arc::new(BoundedBuffer::new(4));

    let producer_a = ProducerWorker::new(
      "producer-a",
      source_a,
      buffer.clone(),
      Duration::from_millis(120),
    )
    .spawn()
    .expect("failed to spawn producer-a");
    let producer_b = ProducerWorker::new(
      "producer-b",
      source_b,
      buffer.clone(),
      Duration::from_millis(130),
    )
    .spawn()
    .expect("failed to spawn producer-b");
    let consumer_1 = ConsumerWorker::new(
      "consumer-1",
      buffer.clone(),
      total / 2,
      Duration::from_millis(200),
    )
    .spawn()
    .expect("failed to spawn consumer-1");
    let consumer_2 = ConsumerWorker::new(
      "consumer-2",
      buffer.clone(),
      total / 2,
      Duration::from_millis(180),
    )
    .spawn()
    .expect("failed to spawn consumer-2");

    let report_a = producer_a.join();
    let report_b = producer_b.join();
    let (report_1, dest_1) = consumer_1.join();
    let (report_2, dest_2) = consumer_2.join();

    let total_produced = report_a.transferred + report_b.transferred;
    let total_consumed = dest_1.len() + dest_2.len();
    println!("total produced:    {}", total_produced);
    println!("total consumed:    {}", total_consumed);
    println!("consumer-1 got:    {:?}", dest_1);
    println!("consumer-2 got:    {:?}", dest_2);
    println!(
      "all transferred:   {}",
      report_1.is_completed() && report_2.is_completed() && total_produced == total_consumed
    );
  }
}
