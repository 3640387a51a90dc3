//! Selection of the asset keys a reconciliation actually updates.

use crate::domain::{AssetKey, RawMosaic};
use std::collections::BTreeSet;

/// Deduplicated union of the triggering transaction's asset keys and the
/// account's confirmed asset keys.
///
/// Bounds the merge to assets in play for this event; everything else the
/// account holds stays untouched in storage.
pub fn relevant_asset_keys(
    event_mosaics: &[RawMosaic],
    owned_mosaics: &[RawMosaic],
) -> BTreeSet<AssetKey> {
    event_mosaics
        .iter()
        .chain(owned_mosaics.iter())
        .filter_map(RawMosaic::asset_key)
        .collect()
}
