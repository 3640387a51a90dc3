//! Node client abstraction for the blockchain node's REST interface.

use crate::domain::{AccountState, Address, PendingTransaction, RawMosaic};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::NisNodeClient;
pub use mock::MockNodeClient;

/// Read-only node queries the reconciliation workflow depends on.
///
/// Implementations bound their own latency (timeouts, retry); the workflow
/// never retries on top of them.
#[async_trait]
pub trait NodeClient: Send + Sync + fmt::Debug {
    /// Confirmed account state. All fields absent when the node has never
    /// seen the address.
    async fn get_account(&self, address: &Address) -> Result<AccountState, NodeClientError>;

    /// Snapshot of the unconfirmed pool relevant to the address. Node-side
    /// filtering may be loose; callers re-filter by party.
    async fn get_unconfirmed_transactions(
        &self,
        address: &Address,
    ) -> Result<Vec<PendingTransaction>, NodeClientError>;

    /// Confirmed per-mosaic holdings in node-native shape.
    async fn get_owned_mosaics(&self, address: &Address)
        -> Result<Vec<RawMosaic>, NodeClientError>;
}

/// Error type for node client operations.
#[derive(Debug, Clone, Error)]
pub enum NodeClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}
