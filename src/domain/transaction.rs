//! Unconfirmed-pool transactions and the incoming transaction event.

use super::asset::RawMosaic;
use super::primitives::{Address, PublicKey};
use serde::{Deserialize, Serialize};

/// A transaction still sitting in the node's unconfirmed pool.
///
/// The signer is a public key; its address is resolved through an
/// `AddressDeriver` at delta-computation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub signer: PublicKey,
    pub recipient: Address,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub mosaics: Vec<RawMosaic>,
}

impl PendingTransaction {
    pub fn new(signer: PublicKey, recipient: Address, amount: i64) -> Self {
        PendingTransaction {
            signer,
            recipient,
            amount,
            mosaics: Vec::new(),
        }
    }

    pub fn with_mosaic(mut self, mosaic: RawMosaic) -> Self {
        self.mosaics.push(mosaic);
        self
    }
}

/// One delivered transaction event: the target address (from the routing
/// key) plus the raw transaction payload, kept as JSON so it can be
/// republished untouched alongside the merged balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEvent {
    pub address: Address,
    pub tx: serde_json::Value,
}

impl TransactionEvent {
    /// Parse a delivery payload into an event for the given address.
    pub fn from_payload(address: Address, payload: &[u8]) -> Result<Self, serde_json::Error> {
        let tx = serde_json::from_slice(payload)?;
        Ok(TransactionEvent { address, tx })
    }

    /// Mosaics referenced by the triggering transaction, if any.
    ///
    /// A missing or malformed `mosaics` field reads as empty; the event is
    /// still reconcilable for the native balance.
    pub fn mosaics(&self) -> Vec<RawMosaic> {
        self.tx
            .get("mosaics")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetKey;

    #[test]
    fn test_event_from_payload() {
        let payload = br#"{"amount": 30, "recipient": "TALICE"}"#;
        let event =
            TransactionEvent::from_payload(Address::new("TALICE".to_string()), payload).unwrap();
        assert_eq!(event.tx["amount"], 30);
        assert!(event.mosaics().is_empty());
    }

    #[test]
    fn test_event_from_payload_rejects_invalid_json() {
        let result = TransactionEvent::from_payload(Address::new("TALICE".to_string()), b"not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_event_mosaics() {
        let payload = br#"{
            "amount": 0,
            "mosaics": [{"mosaicId": {"namespaceId": "ns", "name": "coin"}, "quantity": 10}]
        }"#;
        let event =
            TransactionEvent::from_payload(Address::new("TALICE".to_string()), payload).unwrap();
        let mosaics = event.mosaics();
        assert_eq!(mosaics.len(), 1);
        assert_eq!(mosaics[0].asset_key(), Some(AssetKey::new("ns", "coin")));
    }

    #[test]
    fn test_event_malformed_mosaics_reads_as_empty() {
        let payload = br#"{"amount": 1, "mosaics": "oops"}"#;
        let event =
            TransactionEvent::from_payload(Address::new("TALICE".to_string()), payload).unwrap();
        assert!(event.mosaics().is_empty());
    }

    #[test]
    fn test_pending_transaction_wire_shape() {
        let json = serde_json::json!({
            "signer": "a1b2",
            "recipient": "TBOB",
            "amount": 5,
            "mosaics": [{"mosaicId": {"namespaceId": "ns", "name": "coin"}, "quantity": 2}]
        });
        let tx: PendingTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.signer, PublicKey::new("a1b2".to_string()));
        assert_eq!(tx.recipient, Address::new("TBOB".to_string()));
        assert_eq!(tx.amount, 5);
        assert_eq!(tx.mosaics.len(), 1);
    }
}
