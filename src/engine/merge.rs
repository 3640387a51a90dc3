//! Merge of confirmed figures and pending deltas into the account view.

use super::delta::PendingDelta;
use crate::domain::{Address, AssetKey, Balance, MosaicBalance, ReconciliationResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Combine the confirmed state and the pending delta into the view to
/// persist and publish, restricted to the relevant asset keys.
///
/// Native: an absent confirmed balance yields no balance fields at all. A
/// present confirmed balance with a zero pending delta reports
/// `unconfirmed = 0`, not the confirmed figure; downstream consumers read
/// that as "no unconfirmed change" and the contract is kept as-is.
///
/// Mosaics: every relevant key gets `confirmed` (or 0) and
/// `confirmed + delta` (or + 0); keys outside the relevant set never appear.
pub fn merge_balances(
    address: Address,
    confirmed_balance: Option<i64>,
    confirmed_mosaics: &HashMap<AssetKey, i64>,
    delta: &PendingDelta,
    relevant: &BTreeSet<AssetKey>,
) -> ReconciliationResult {
    let balance = confirmed_balance.map(|confirmed| Balance {
        confirmed,
        unconfirmed: if delta.native != 0 {
            confirmed + delta.native
        } else {
            0
        },
    });

    let mosaics: BTreeMap<AssetKey, MosaicBalance> = relevant
        .iter()
        .map(|key| {
            let confirmed = confirmed_mosaics.get(key).copied().unwrap_or(0);
            (
                key.clone(),
                MosaicBalance {
                    confirmed,
                    unconfirmed: confirmed + delta.mosaic(key),
                },
            )
        })
        .collect();

    ReconciliationResult {
        address,
        balance,
        mosaics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::new("TALICE".to_string())
    }

    fn delta_with(native: i64, mosaics: &[(&AssetKey, i64)]) -> PendingDelta {
        let mut delta = PendingDelta {
            native,
            ..Default::default()
        };
        for (key, quantity) in mosaics {
            delta.mosaics.insert((*key).clone(), *quantity);
        }
        delta
    }

    #[test]
    fn test_native_merge_with_delta() {
        let result = merge_balances(
            addr(),
            Some(100),
            &HashMap::new(),
            &delta_with(30, &[]),
            &BTreeSet::new(),
        );
        assert_eq!(
            result.balance,
            Some(Balance {
                confirmed: 100,
                unconfirmed: 130
            })
        );
    }

    #[test]
    fn test_zero_delta_collapses_unconfirmed() {
        let result = merge_balances(
            addr(),
            Some(100),
            &HashMap::new(),
            &PendingDelta::default(),
            &BTreeSet::new(),
        );
        assert_eq!(
            result.balance,
            Some(Balance {
                confirmed: 100,
                unconfirmed: 0
            })
        );
    }

    #[test]
    fn test_absent_confirmed_balance_omitted() {
        let result = merge_balances(
            addr(),
            None,
            &HashMap::new(),
            &delta_with(30, &[]),
            &BTreeSet::new(),
        );
        assert_eq!(result.balance, None);
    }

    #[test]
    fn test_present_zero_balance_is_kept() {
        let result = merge_balances(
            addr(),
            Some(0),
            &HashMap::new(),
            &delta_with(5, &[]),
            &BTreeSet::new(),
        );
        assert_eq!(
            result.balance,
            Some(Balance {
                confirmed: 0,
                unconfirmed: 5
            })
        );
    }

    #[test]
    fn test_negative_delta() {
        let result = merge_balances(
            addr(),
            Some(100),
            &HashMap::new(),
            &delta_with(-40, &[]),
            &BTreeSet::new(),
        );
        assert_eq!(
            result.balance,
            Some(Balance {
                confirmed: 100,
                unconfirmed: 60
            })
        );
    }

    #[test]
    fn test_mosaic_merge_for_relevant_keys() {
        let coin = AssetKey::new("ns", "coin");
        let mut confirmed = HashMap::new();
        confirmed.insert(coin.clone(), 50);
        let relevant: BTreeSet<AssetKey> = [coin.clone()].into_iter().collect();

        let result = merge_balances(
            addr(),
            None,
            &confirmed,
            &delta_with(0, &[(&coin, -10)]),
            &relevant,
        );
        assert_eq!(
            result.mosaics[&coin],
            MosaicBalance {
                confirmed: 50,
                unconfirmed: 40
            }
        );
    }

    #[test]
    fn test_key_scoping_excludes_non_relevant() {
        // Confirmed map has key A, the event references key B; only B may
        // appear in the output.
        let key_a = AssetKey::new("ns", "a");
        let key_b = AssetKey::new("ns", "b");
        let mut confirmed = HashMap::new();
        confirmed.insert(key_a.clone(), 100);
        let relevant: BTreeSet<AssetKey> = [key_b.clone()].into_iter().collect();

        let result = merge_balances(
            addr(),
            None,
            &confirmed,
            &PendingDelta::default(),
            &relevant,
        );
        assert!(!result.mosaics.contains_key(&key_a));
        assert_eq!(
            result.mosaics[&key_b],
            MosaicBalance {
                confirmed: 0,
                unconfirmed: 0
            }
        );
    }

    #[test]
    fn test_unknown_relevant_key_reads_zero_both_sides() {
        let fresh = AssetKey::new("ns", "fresh");
        let relevant: BTreeSet<AssetKey> = [fresh.clone()].into_iter().collect();
        let result = merge_balances(
            addr(),
            None,
            &HashMap::new(),
            &PendingDelta::default(),
            &relevant,
        );
        assert_eq!(
            result.mosaics[&fresh],
            MosaicBalance {
                confirmed: 0,
                unconfirmed: 0
            }
        );
    }

    #[test]
    fn test_mosaic_without_delta_does_not_collapse() {
        // Zero-collapsing applies to the native balance only.
        let coin = AssetKey::new("ns", "coin");
        let mut confirmed = HashMap::new();
        confirmed.insert(coin.clone(), 50);
        let relevant: BTreeSet<AssetKey> = [coin.clone()].into_iter().collect();

        let result = merge_balances(
            addr(),
            None,
            &confirmed,
            &PendingDelta::default(),
            &relevant,
        );
        assert_eq!(
            result.mosaics[&coin],
            MosaicBalance {
                confirmed: 50,
                unconfirmed: 50
            }
        );
    }
}
