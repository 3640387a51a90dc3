//! Per-event reconciliation workflow.
//!
//! One delivery runs fetch confirmed -> fetch pending -> compute -> merge ->
//! persist -> publish, in that order; any error aborts the remaining steps.
//! The workflow never retries and never blocks the queue: failures are
//! logged and the delivery is acknowledged by the consumer regardless.

use crate::db::AccountRepository;
use crate::domain::{flatten_mosaics, ReconciliationResult, TransactionEvent};
use crate::engine::{merge_balances, pending_delta, relevant_asset_keys};
use crate::network::AddressDeriver;
use crate::nis::{NodeClient, NodeClientError};
use crate::transport::{Delivery, EventPublisher, TopicScheme, TransportError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Routing key does not carry an address: {0}")]
    MalformedTopic(String),
    #[error("Malformed event payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Node(#[from] NodeClientError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Publish(#[from] TransportError),
}

/// Reconciles one account per delivered transaction event.
pub struct Reconciler {
    node: Arc<dyn NodeClient>,
    repo: Arc<AccountRepository>,
    publisher: Arc<dyn EventPublisher>,
    deriver: Arc<dyn AddressDeriver>,
    topics: TopicScheme,
}

impl Reconciler {
    pub fn new(
        node: Arc<dyn NodeClient>,
        repo: Arc<AccountRepository>,
        publisher: Arc<dyn EventPublisher>,
        deriver: Arc<dyn AddressDeriver>,
        topics: TopicScheme,
    ) -> Self {
        Self {
            node,
            repo,
            publisher,
            deriver,
            topics,
        }
    }

    /// Process one delivery, fail-open.
    ///
    /// Errors are terminal for the event: logged here, never propagated, so
    /// the consumer can acknowledge unconditionally. A failed event leaves
    /// the stored view stale until the next event for that address.
    pub async fn process(&self, delivery: &Delivery) {
        match self.reconcile(delivery).await {
            Ok(result) => {
                info!("Reconciled balance for {}", result.address);
            }
            Err(e) => {
                error!(
                    "Reconciliation failed for routing key {}: {}",
                    delivery.routing_key, e
                );
            }
        }
    }

    /// Run the full workflow for one delivery and return the merged view.
    pub async fn reconcile(
        &self,
        delivery: &Delivery,
    ) -> Result<ReconciliationResult, ReconcileError> {
        let address = self
            .topics
            .address_from_transaction_topic(&delivery.routing_key)
            .ok_or_else(|| ReconcileError::MalformedTopic(delivery.routing_key.clone()))?;
        let event = TransactionEvent::from_payload(address, &delivery.payload)?;

        let account = self.node.get_account(&event.address).await?;
        let pending = self.node.get_unconfirmed_transactions(&event.address).await?;
        let owned = self.node.get_owned_mosaics(&event.address).await?;

        let delta = pending_delta(&event.address, &pending, self.deriver.as_ref());
        let relevant = relevant_asset_keys(&event.mosaics(), &owned);
        let confirmed_mosaics = flatten_mosaics(&owned);

        let result = merge_balances(
            event.address.clone(),
            account.balance,
            &confirmed_mosaics,
            &delta,
            &relevant,
        );

        self.repo.upsert_reconciliation(&result).await?;

        let topic = self.topics.balance_topic(&result.address);
        self.publisher
            .publish(&topic, result.published_payload(&event.tx))
            .await?;

        Ok(result)
    }
}
