//! Core functionality tests for the perishable queue system
//!
//! These tests verify the fundamental put/take cycle through the public
//! API: FIFO ordering, occupancy reporting, producer tagging and the
//! non-blocking variants.

#[cfg(test)]
mod tests {
    use crate::queue::api::{QueueConfig, QueueError, QueueManager, DIRECT_PRODUCER_TAG};
    use std::sync::Arc;
    use std::time::Duration;

    fn relaxed_config(capacity: usize) -> QueueConfig {
        // TTL and sweep interval far beyond test runtime so nothing
        // expires unless a test advances a mock clock
        QueueConfig::new(capacity, Duration::from_secs(300), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_queue_manager_creation() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(8)).unwrap());

        let producer1 = manager.create_producer("producer-1".to_string());
        let producer2 = manager.create_producer("producer-2".to_string());
        assert_eq!(producer1.producer_tag(), "producer-1");
        assert_eq!(producer2.producer_tag(), "producer-2");

        let consumer = manager.create_consumer("worker-a".to_string());
        assert_eq!(consumer.consumer_name(), "worker-a");

        assert_eq!(manager.size(), 0);
        let stats = manager.stats().unwrap();
        assert_eq!(stats.capacity, 8);
        assert_eq!(stats.total_enqueued, 0);
        assert_eq!(stats.total_delivered, 0);

        println!("✓ QueueManager creation and handle wiring works");
    }

    #[tokio::test]
    async fn test_put_take_round_trip() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(8)).unwrap());
        let producer = manager.create_producer("round-trip".to_string());
        let consumer = manager.create_consumer("round-trip-consumer".to_string());

        producer.put("hello queue".to_string()).await.unwrap();
        assert_eq!(manager.size(), 1);

        let item = consumer.take().await.unwrap();
        assert_eq!(item.payload(), "hello queue");
        assert_eq!(item.producer_tag(), "round-trip");
        assert_eq!(manager.size(), 0);

        println!("✓ Basic put/take round trip works");
    }

    #[tokio::test]
    async fn test_fifo_ordering_across_producers() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(8)).unwrap());
        let alpha = manager.create_producer("alpha".to_string());
        let beta = manager.create_producer("beta".to_string());
        let consumer = manager.create_consumer("ordered".to_string());

        alpha.put("1".to_string()).await.unwrap();
        beta.put("2".to_string()).await.unwrap();
        alpha.put("3".to_string()).await.unwrap();
        beta.put("4".to_string()).await.unwrap();

        // Delivery follows admission order regardless of which producer
        // supplied the item
        let expected = [("1", "alpha"), ("2", "beta"), ("3", "alpha"), ("4", "beta")];
        for (payload, tag) in expected {
            let item = consumer.take().await.unwrap();
            assert_eq!(item.payload(), payload);
            assert_eq!(item.producer_tag(), tag);
        }

        println!("✓ FIFO ordering holds across producers");
    }

    #[tokio::test]
    async fn test_direct_queue_operations_use_direct_tag() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(4)).unwrap());
        let queue = manager.queue();

        queue.put("untagged".to_string()).await.unwrap();
        let item = queue.take().await.unwrap();

        assert_eq!(item.payload(), "untagged");
        assert_eq!(item.producer_tag(), DIRECT_PRODUCER_TAG);

        println!("✓ Direct queue operations carry the direct tag");
    }

    #[tokio::test]
    async fn test_non_blocking_variants() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(2)).unwrap());
        let queue = manager.queue();

        assert!(
            queue.try_take().unwrap().is_none(),
            "try_take on an empty queue should report nothing available"
        );

        queue.try_put("one".to_string()).unwrap();
        queue.try_put("two".to_string()).unwrap();

        match queue.try_put("three".to_string()) {
            Err(QueueError::Full { capacity }) => assert_eq!(capacity, 2),
            other => panic!("Expected Full error, got {:?}", other),
        }

        let item = queue.try_take().unwrap().expect("item should be available");
        assert_eq!(item.payload(), "one");

        // The freed slot is immediately usable again
        queue.try_put("three".to_string()).unwrap();
        assert_eq!(manager.size(), 2);

        println!("✓ Non-blocking variants behave correctly");
    }

    #[tokio::test]
    async fn test_size_and_stats_reporting() {
        let manager = Arc::new(QueueManager::<String>::new(relaxed_config(8)).unwrap());
        let producer = manager.create_producer("counted".to_string());
        let consumer = manager.create_consumer("counting-consumer".to_string());

        for i in 0..5 {
            producer.put(format!("item-{}", i)).await.unwrap();
            assert_eq!(manager.size(), i + 1);
        }

        for i in 0..3 {
            consumer.take().await.unwrap();
            assert_eq!(manager.size(), 5 - i - 1);
        }

        let stats = manager.stats().unwrap();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 8);
        assert_eq!(stats.total_enqueued, 5);
        assert_eq!(stats.total_delivered, 3);
        assert_eq!(stats.total_expired(), 0);

        println!("✓ Size and stats reporting stays consistent");
    }

    #[tokio::test]
    async fn test_payload_ownership_can_be_taken() {
        let manager = Arc::new(QueueManager::<Vec<u8>>::new(relaxed_config(4)).unwrap());
        let queue = manager.queue();

        queue.put(vec![1, 2, 3]).await.unwrap();
        let item = queue.take().await.unwrap();

        assert_eq!(item.payload(), &[1, 2, 3]);
        let owned = item.into_payload();
        assert_eq!(owned, vec![1, 2, 3]);

        println!("✓ Payloads can be borrowed and then moved out");
    }
}
