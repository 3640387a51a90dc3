//! Account state as seen by the node and the merged view this service emits.

use super::asset::AssetKey;
use super::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest units per whole native coin (micro-XEM).
pub const NATIVE_DIVISIBILITY: i64 = 1_000_000;

/// Confirmed account state as reported by the node.
///
/// All fields are absent when the node has never seen the address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub balance: Option<i64>,
    #[serde(rename = "vestedBalance")]
    pub vested_balance: Option<i64>,
}

/// Native balance pair in the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub confirmed: i64,
    pub unconfirmed: i64,
}

/// Per-mosaic balance pair in the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicBalance {
    pub confirmed: i64,
    pub unconfirmed: i64,
}

/// The merged account view produced by one reconciliation.
///
/// `balance` is None when the node had no confirmed figure for the address.
/// `mosaics` only holds the keys relevant to the triggering event; persisting
/// it must not disturb other keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub address: Address,
    pub balance: Option<Balance>,
    pub mosaics: BTreeMap<AssetKey, MosaicBalance>,
}

impl ReconciliationResult {
    /// Payload published after persisting: the merged view plus the
    /// triggering transaction, UTF-8 JSON.
    pub fn published_payload(&self, tx: &serde_json::Value) -> Vec<u8> {
        let body = serde_json::json!({
            "address": self.address,
            "balance": self.balance,
            "mosaics": self.mosaics,
            "tx": tx,
        });
        body.to_string().into_bytes()
    }
}

/// A smallest-unit value paired with its whole-coin rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisibleAmount {
    pub value: i64,
    pub amount: String,
}

impl DivisibleAmount {
    fn native(value: i64) -> Self {
        DivisibleAmount {
            value,
            amount: format!("{:.6}", value as f64 / NATIVE_DIVISIBILITY as f64),
        }
    }
}

/// Native balance rendered with its divisibility, for read surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisibleBalance {
    pub divisibility: i64,
    pub confirmed: DivisibleAmount,
    pub unconfirmed: DivisibleAmount,
}

impl Balance {
    /// Render this balance with the native divisibility applied.
    pub fn with_divisibility(&self) -> DivisibleBalance {
        DivisibleBalance {
            divisibility: NATIVE_DIVISIBILITY,
            confirmed: DivisibleAmount::native(self.confirmed),
            unconfirmed: DivisibleAmount::native(self.unconfirmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_state_wire_shape() {
        let json = serde_json::json!({"balance": 100, "vestedBalance": 80});
        let state: AccountState = serde_json::from_value(json).unwrap();
        assert_eq!(state.balance, Some(100));
        assert_eq!(state.vested_balance, Some(80));

        let empty: AccountState = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty, AccountState::default());
    }

    #[test]
    fn test_published_payload_shape() {
        let mut mosaics = BTreeMap::new();
        mosaics.insert(
            AssetKey::new("ns", "coin"),
            MosaicBalance {
                confirmed: 50,
                unconfirmed: 40,
            },
        );
        let result = ReconciliationResult {
            address: Address::new("TALICE".to_string()),
            balance: Some(Balance {
                confirmed: 100,
                unconfirmed: 130,
            }),
            mosaics,
        };
        let tx = serde_json::json!({"amount": 30});
        let payload: serde_json::Value =
            serde_json::from_slice(&result.published_payload(&tx)).unwrap();

        assert_eq!(payload["address"], "TALICE");
        assert_eq!(payload["balance"]["confirmed"], 100);
        assert_eq!(payload["balance"]["unconfirmed"], 130);
        assert_eq!(payload["mosaics"]["ns:coin"]["confirmed"], 50);
        assert_eq!(payload["mosaics"]["ns:coin"]["unconfirmed"], 40);
        assert_eq!(payload["tx"]["amount"], 30);
    }

    #[test]
    fn test_published_payload_omits_absent_balance() {
        let result = ReconciliationResult {
            address: Address::new("TNEW".to_string()),
            balance: None,
            mosaics: BTreeMap::new(),
        };
        let payload: serde_json::Value =
            serde_json::from_slice(&result.published_payload(&serde_json::json!({}))).unwrap();
        assert!(payload["balance"].is_null());
    }

    #[test]
    fn test_divisible_balance_rendering() {
        let balance = Balance {
            confirmed: 1_500_000,
            unconfirmed: 2_250_000,
        };
        let view = balance.with_divisibility();
        assert_eq!(view.divisibility, NATIVE_DIVISIBILITY);
        assert_eq!(view.confirmed.value, 1_500_000);
        assert_eq!(view.confirmed.amount, "1.500000");
        assert_eq!(view.unconfirmed.amount, "2.250000");
    }
}
