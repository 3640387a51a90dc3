//! Mock node client for testing without network calls.

use super::{NodeClient, NodeClientError};
use crate::domain::{AccountState, Address, PendingTransaction, RawMosaic};
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock node client that returns predefined state.
///
/// The unconfirmed pool is shared across addresses, mirroring the loose
/// node-side filtering the calculator compensates for.
#[derive(Debug, Clone, Default)]
pub struct MockNodeClient {
    accounts: HashMap<Address, AccountState>,
    pending: Vec<PendingTransaction>,
    owned: HashMap<Address, Vec<RawMosaic>>,
    failing: bool,
}

impl MockNodeClient {
    /// Create a new mock with no known accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confirmed state for an address.
    pub fn with_account(mut self, address: Address, state: AccountState) -> Self {
        self.accounts.insert(address, state);
        self
    }

    /// Set a confirmed native balance for an address.
    pub fn with_balance(self, address: Address, balance: i64) -> Self {
        self.with_account(
            address,
            AccountState {
                balance: Some(balance),
                vested_balance: None,
            },
        )
    }

    /// Add a transaction to the shared unconfirmed pool.
    pub fn with_pending(mut self, tx: PendingTransaction) -> Self {
        self.pending.push(tx);
        self
    }

    /// Add a confirmed mosaic holding for an address.
    pub fn with_owned_mosaic(mut self, address: Address, mosaic: RawMosaic) -> Self {
        self.owned.entry(address).or_default().push(mosaic);
        self
    }

    /// Make every query fail with a network error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check_failure(&self) -> Result<(), NodeClientError> {
        if self.failing {
            Err(NodeClientError::Network("mock node unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn get_account(&self, address: &Address) -> Result<AccountState, NodeClientError> {
        self.check_failure()?;
        Ok(self.accounts.get(address).cloned().unwrap_or_default())
    }

    async fn get_unconfirmed_transactions(
        &self,
        _address: &Address,
    ) -> Result<Vec<PendingTransaction>, NodeClientError> {
        self.check_failure()?;
        Ok(self.pending.clone())
    }

    async fn get_owned_mosaics(
        &self,
        address: &Address,
    ) -> Result<Vec<RawMosaic>, NodeClientError> {
        self.check_failure()?;
        Ok(self.owned.get(address).cloned().unwrap_or_default())
    }
}
