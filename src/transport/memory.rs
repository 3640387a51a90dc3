//! In-process transport binding: a bounded delivery queue with a shared ack
//! log, and a broadcast publisher for balance events.

use super::{AckSink, Delivery, DeliveryStream, EventPublisher, TransportError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

#[derive(Debug, Default)]
struct AckLog {
    tags: Mutex<Vec<u64>>,
}

impl AckSink for AckLog {
    fn ack(&self, delivery_tag: u64) {
        self.tags.lock().unwrap().push(delivery_tag);
    }
}

/// Producer half of the in-process queue.
#[derive(Clone)]
pub struct QueueHandle {
    tx: mpsc::Sender<Delivery>,
    next_tag: Arc<AtomicU64>,
    ack_log: Arc<AckLog>,
}

impl QueueHandle {
    /// Enqueue a payload on a routing key; returns the delivery tag.
    pub async fn publish(
        &self,
        routing_key: &str,
        payload: Vec<u8>,
    ) -> Result<u64, TransportError> {
        let delivery_tag = self.next_tag.fetch_add(1, Ordering::Relaxed) + 1;
        let delivery = Delivery {
            routing_key: routing_key.to_string(),
            payload,
            delivery_tag,
            acker: self.ack_log.clone(),
        };
        self.tx
            .send(delivery)
            .await
            .map_err(|_| TransportError::Closed)?;
        Ok(delivery_tag)
    }

    /// Tags acknowledged so far, in ack order.
    pub fn acked_tags(&self) -> Vec<u64> {
        self.ack_log.tags.lock().unwrap().clone()
    }
}

/// Consumer half of the in-process queue.
pub struct InMemoryQueue {
    rx: mpsc::Receiver<Delivery>,
}

#[async_trait]
impl DeliveryStream for InMemoryQueue {
    async fn recv(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }
}

/// Create a bounded in-process delivery queue.
pub fn in_memory_queue(capacity: usize) -> (QueueHandle, InMemoryQueue) {
    let (tx, rx) = mpsc::channel(capacity);
    let handle = QueueHandle {
        tx,
        next_tag: Arc::new(AtomicU64::new(0)),
        ack_log: Arc::new(AckLog::default()),
    };
    (handle, InMemoryQueue { rx })
}

/// A published balance event: topic plus UTF-8 JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEvent {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Publisher fanning balance events out on a broadcast channel.
///
/// Publishing with no live subscribers is not an error; events are simply
/// dropped, matching a fire-and-forget broker publish.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: broadcast::Sender<BalanceEvent>,
}

impl ChannelPublisher {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<BalanceEvent>) {
        let (tx, rx) = broadcast::channel(capacity);
        (ChannelPublisher { tx }, rx)
    }

    /// Open another subscription to the published events.
    pub fn subscribe(&self) -> broadcast::Receiver<BalanceEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for ChannelPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        self.tx
            .send(BalanceEvent {
                topic: topic.to_string(),
                payload,
            })
            .ok();
        Ok(())
    }
}
