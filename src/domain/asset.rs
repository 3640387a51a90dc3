//! Asset (mosaic) identity and the node-native mosaic list shape.
//!
//! A mosaic is identified by a namespace plus a name. Every map lookup in
//! this crate uses the canonical `"namespaceId:name"` rendering produced by
//! `AssetKey::new`; nothing else concatenates the two parts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical asset key: `"namespaceId:name"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetKey(pub String);

impl AssetKey {
    /// Encode a (namespace, name) pair into the canonical key.
    pub fn new(namespace_id: &str, name: &str) -> Self {
        AssetKey(format!("{}:{}", namespace_id, name))
    }

    /// Wrap an already-canonical key string.
    pub fn from_raw(key: String) -> Self {
        AssetKey(key)
    }

    /// Get the key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified mosaic id as the node renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicId {
    #[serde(rename = "namespaceId")]
    pub namespace_id: Option<String>,
    pub name: String,
}

/// One entry of a node-native mosaic list: `{mosaicId, quantity}`.
///
/// Appears both on owned-mosaic queries and inline on transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMosaic {
    #[serde(rename = "mosaicId")]
    pub mosaic_id: Option<MosaicId>,
    #[serde(default)]
    pub quantity: i64,
}

impl RawMosaic {
    /// Build a well-formed entry (convenience for fixtures).
    pub fn new(namespace_id: &str, name: &str, quantity: i64) -> Self {
        RawMosaic {
            mosaic_id: Some(MosaicId {
                namespace_id: Some(namespace_id.to_string()),
                name: name.to_string(),
            }),
            quantity,
        }
    }

    /// Canonical key for this entry, or None if the namespace is missing.
    pub fn asset_key(&self) -> Option<AssetKey> {
        let id = self.mosaic_id.as_ref()?;
        let namespace = id.namespace_id.as_deref()?;
        Some(AssetKey::new(namespace, &id.name))
    }
}

/// Convert a node-native mosaic list into the key -> quantity mapping.
///
/// Entries without a mosaic id or namespace are dropped. Duplicate keys keep
/// the last quantity seen.
pub fn flatten_mosaics(mosaics: &[RawMosaic]) -> HashMap<AssetKey, i64> {
    let mut flattened = HashMap::new();
    for mosaic in mosaics {
        if let Some(key) = mosaic.asset_key() {
            flattened.insert(key, mosaic.quantity);
        }
    }
    flattened
}
