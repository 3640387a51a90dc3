//! Consumer loop: pulls deliveries and runs reconciliations with a bounded
//! number in flight.

use super::workflow::Reconciler;
use crate::transport::DeliveryStream;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::info;

/// Drive the reconciler from a delivery stream until it closes.
///
/// At most `max_in_flight` reconciliations run concurrently; the bound is
/// backpressure only, reconciliations for the same address are not
/// serialized. Every delivery is acknowledged after processing, success or
/// failure. Returns once the stream closes and in-flight work has drained.
pub async fn run_consumer(
    mut stream: impl DeliveryStream,
    reconciler: Arc<Reconciler>,
    max_in_flight: usize,
) {
    let semaphore = Arc::new(Semaphore::new(max_in_flight));

    while let Some(delivery) = stream.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let reconciler = reconciler.clone();
        tokio::spawn(async move {
            reconciler.process(&delivery).await;
            delivery.ack();
            drop(permit);
        });
    }

    // Stream closed; wait for in-flight reconciliations to finish.
    let _drain = semaphore.acquire_many(max_in_flight as u32).await;
    info!("Consumer stopped");
}
