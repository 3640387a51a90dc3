//! Net pending exposure of one address against the unconfirmed pool.

use crate::domain::{flatten_mosaics, Address, AssetKey, PendingTransaction};
use crate::network::AddressDeriver;
use std::collections::HashMap;
use tracing::warn;

/// Signed deltas accumulated from qualifying unconfirmed transactions.
///
/// `mosaics` only holds keys touched by at least one qualifying transaction;
/// an untouched key reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDelta {
    pub native: i64,
    pub mosaics: HashMap<AssetKey, i64>,
}

impl PendingDelta {
    /// Delta for one asset key, zero when untouched.
    pub fn mosaic(&self, key: &AssetKey) -> i64 {
        self.mosaics.get(key).copied().unwrap_or(0)
    }
}

/// Scan the unconfirmed pool and compute the signed native and per-mosaic
/// deltas relative to `address`.
///
/// Self-transfers (derived signer == recipient) contribute nothing on either
/// side. Incoming amounts credit, outgoing amounts debit; a transaction where
/// the address is neither party is ignored. Transactions whose signer key
/// cannot be derived are skipped.
pub fn pending_delta(
    address: &Address,
    pending: &[PendingTransaction],
    deriver: &dyn AddressDeriver,
) -> PendingDelta {
    let mut delta = PendingDelta::default();

    for tx in pending {
        let signer_address = match deriver.derive(&tx.signer) {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Skipping unconfirmed transaction with underivable signer: {}", e);
                continue;
            }
        };

        // Self transfer: no net effect on any party.
        if signer_address == tx.recipient {
            continue;
        }

        if *address == tx.recipient {
            delta.native += tx.amount;
            for (key, quantity) in flatten_mosaics(&tx.mosaics) {
                *delta.mosaics.entry(key).or_insert(0) += quantity;
            }
        }

        if *address == signer_address {
            delta.native -= tx.amount;
            for (key, quantity) in flatten_mosaics(&tx.mosaics) {
                *delta.mosaics.entry(key).or_insert(0) -= quantity;
            }
        }
    }

    delta
}
