//! Transport seam: deliveries in, balance events out.
//!
//! The broker itself is a deployment concern. The core consumes a
//! `DeliveryStream` and an `EventPublisher`; the in-process binding lives in
//! `memory`. Topic formats are owned by `TopicScheme` so no other module
//! concatenates routing keys.

use crate::domain::Address;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub mod memory;

pub use memory::{in_memory_queue, BalanceEvent, ChannelPublisher, InMemoryQueue, QueueHandle};

/// Error type for transport operations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Transport closed")]
    Closed,
    #[error("Publish failed: {0}")]
    Publish(String),
}

pub(crate) trait AckSink: Send + Sync {
    fn ack(&self, delivery_tag: u64);
}

/// One delivered message plus its acknowledgement handle.
///
/// Acknowledgement is infallible from the consumer's point of view and is
/// issued unconditionally after processing, success or failure.
#[derive(Clone)]
pub struct Delivery {
    pub routing_key: String,
    pub payload: Vec<u8>,
    pub delivery_tag: u64,
    pub(crate) acker: Arc<dyn AckSink>,
}

impl Delivery {
    /// Acknowledge this delivery, removing it from the queue.
    pub fn ack(&self) {
        self.acker.ack(self.delivery_tag);
    }
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("routing_key", &self.routing_key)
            .field("payload_len", &self.payload.len())
            .field("delivery_tag", &self.delivery_tag)
            .finish()
    }
}

/// Source of deliveries for the consumer loop.
#[async_trait]
pub trait DeliveryStream: Send {
    /// Next delivery, or None when the stream is closed.
    async fn recv(&mut self) -> Option<Delivery>;
}

/// Outbound publisher for merged balance events.
#[async_trait]
pub trait EventPublisher: Send + Sync + fmt::Debug {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), TransportError>;
}

/// Owns the `<service>_transaction.<address>` / `<service>_balance.<address>`
/// topic formats and address extraction.
#[derive(Debug, Clone)]
pub struct TopicScheme {
    transaction_prefix: String,
    balance_prefix: String,
}

impl TopicScheme {
    pub fn new(service_name: &str) -> Self {
        TopicScheme {
            transaction_prefix: format!("{}_transaction.", service_name),
            balance_prefix: format!("{}_balance.", service_name),
        }
    }

    /// Routing key transaction events for an address arrive on.
    pub fn transaction_topic(&self, address: &Address) -> String {
        format!("{}{}", self.transaction_prefix, address)
    }

    /// Routing key merged balances for an address are published on.
    pub fn balance_topic(&self, address: &Address) -> String {
        format!("{}{}", self.balance_prefix, address)
    }

    /// Extract the target address from a transaction routing key, or None
    /// when the key does not match the scheme.
    pub fn address_from_transaction_topic(&self, routing_key: &str) -> Option<Address> {
        routing_key
            .strip_prefix(&self.transaction_prefix)
            .filter(|rest| !rest.is_empty())
            .map(|rest| Address::new(rest.to_string()))
    }
}
