//! NIS REST client implementation.

use super::{NodeClient, NodeClientError};
use crate::domain::{AccountState, Address, PendingTransaction, RawMosaic};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Node client backed by a NIS node's HTTP interface.
#[derive(Debug, Clone)]
pub struct NisNodeClient {
    client: Client,
    base_url: String,
}

impl NisNodeClient {
    /// Create a new client against the given NIS base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get_json(
        &self,
        path: &str,
        address: &Address,
    ) -> Result<serde_json::Value, NodeClientError> {
        let url = format!("{}{}", self.base_url, path);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(&url)
                .query(&[("address", address.as_str())])
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(NodeClientError::Network(e.to_string()))
                })?;

            let status = response.status();
            if status.is_server_error() {
                return Err(backoff::Error::transient(NodeClientError::Http {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(NodeClientError::Http {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(NodeClientError::Parse(e.to_string())))
        })
        .await
    }
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(default)]
    account: AccountState,
}

#[derive(Debug, Deserialize)]
struct UnconfirmedPage {
    #[serde(default)]
    data: Vec<UnconfirmedEntry>,
}

#[derive(Debug, Deserialize)]
struct UnconfirmedEntry {
    transaction: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MosaicPage {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[async_trait]
impl NodeClient for NisNodeClient {
    async fn get_account(&self, address: &Address) -> Result<AccountState, NodeClientError> {
        debug!("Fetching account state for {}", address);

        let response = self.get_json("/account/get", address).await?;
        let parsed: AccountResponse = serde_json::from_value(response)
            .map_err(|e| NodeClientError::Parse(e.to_string()))?;
        Ok(parsed.account)
    }

    async fn get_unconfirmed_transactions(
        &self,
        address: &Address,
    ) -> Result<Vec<PendingTransaction>, NodeClientError> {
        debug!("Fetching unconfirmed transactions for {}", address);

        let response = self
            .get_json("/account/unconfirmedTransactions", address)
            .await?;
        let page: UnconfirmedPage = serde_json::from_value(response)
            .map_err(|e| NodeClientError::Parse(e.to_string()))?;

        let mut transactions = Vec::new();
        for entry in page.data {
            match serde_json::from_value::<PendingTransaction>(entry.transaction) {
                Ok(tx) => transactions.push(tx),
                Err(e) => {
                    // Non-transfer transaction types lack a recipient; they
                    // carry no balance effect and are dropped here.
                    warn!("Skipping unconfirmed entry: {}", e);
                }
            }
        }

        Ok(transactions)
    }

    async fn get_owned_mosaics(
        &self,
        address: &Address,
    ) -> Result<Vec<RawMosaic>, NodeClientError> {
        debug!("Fetching owned mosaics for {}", address);

        let response = self.get_json("/account/mosaic/owned", address).await?;
        let page: MosaicPage = serde_json::from_value(response)
            .map_err(|e| NodeClientError::Parse(e.to_string()))?;

        let mut mosaics = Vec::new();
        for entry in page.data {
            match serde_json::from_value::<RawMosaic>(entry) {
                Ok(mosaic) => mosaics.push(mosaic),
                Err(e) => {
                    warn!("Skipping malformed mosaic entry: {}", e);
                }
            }
        }

        Ok(mosaics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublicKey;

    #[test]
    fn test_account_response_parsing() {
        let json = serde_json::json!({
            "meta": {"status": "LOCKED"},
            "account": {"balance": 100, "vestedBalance": 70}
        });
        let parsed: AccountResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.account.balance, Some(100));
        assert_eq!(parsed.account.vested_balance, Some(70));
    }

    #[test]
    fn test_account_response_missing_account() {
        let parsed: AccountResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed.account.balance, None);
    }

    #[test]
    fn test_unconfirmed_page_parsing() {
        let json = serde_json::json!({
            "data": [
                {"meta": {"hash": "aa"}, "transaction": {
                    "signer": "a1", "recipient": "TBOB", "amount": 7
                }}
            ]
        });
        let page: UnconfirmedPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.data.len(), 1);
        let tx: PendingTransaction =
            serde_json::from_value(page.data.into_iter().next().unwrap().transaction).unwrap();
        assert_eq!(tx.signer, PublicKey::new("a1".to_string()));
        assert_eq!(tx.amount, 7);
    }

    #[test]
    fn test_mosaic_page_parsing() {
        let json = serde_json::json!({
            "data": [{"mosaicId": {"namespaceId": "ns", "name": "coin"}, "quantity": 9}]
        });
        let page: MosaicPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.data.len(), 1);
        let mosaic: RawMosaic =
            serde_json::from_value(page.data.into_iter().next().unwrap()).unwrap();
        assert_eq!(mosaic, RawMosaic::new("ns", "coin", 9));
    }
}
