//! Network identity and signer-address derivation.
//!
//! Unconfirmed transactions carry the signer as a public key; matching it
//! against the target address requires deriving the signer's address for the
//! configured network. Derivation sits behind a trait so fixtures can supply
//! an explicit key -> address map.

use crate::domain::{Address, PublicKey};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The network an address belongs to. Addresses from different networks
/// never compare equal because the version byte differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    Mainnet,
    Testnet,
    Mijin,
}

impl NetworkId {
    /// Leading version byte of addresses on this network.
    pub fn version_byte(&self) -> u8 {
        match self {
            NetworkId::Mainnet => 0x68,
            NetworkId::Testnet => 0x98,
            NetworkId::Mijin => 0x60,
        }
    }

    /// Parse a network name as it appears in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mainnet" => Some(NetworkId::Mainnet),
            "testnet" => Some(NetworkId::Testnet),
            "mijin" => Some(NetworkId::Mijin),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Mainnet => write!(f, "mainnet"),
            NetworkId::Testnet => write!(f, "testnet"),
            NetworkId::Mijin => write!(f, "mijin"),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AddressDerivationError {
    #[error("Invalid public key hex: {0}")]
    InvalidHex(String),
    #[error("Unknown public key: {0}")]
    UnknownKey(String),
}

/// Derives the address owning a public key on some network.
pub trait AddressDeriver: Send + Sync + fmt::Debug {
    fn derive(&self, public_key: &PublicKey) -> Result<Address, AddressDerivationError>;
}

/// Hash-based deriver: sha256(pubkey) truncated to 20 bytes, prefixed with
/// the network version byte and suffixed with a 4-byte sha256 checksum,
/// hex-encoded uppercase. Deterministic and collision-free per network.
#[derive(Debug, Clone)]
pub struct NetworkAddressDeriver {
    network: NetworkId,
}

impl NetworkAddressDeriver {
    pub fn new(network: NetworkId) -> Self {
        NetworkAddressDeriver { network }
    }
}

impl AddressDeriver for NetworkAddressDeriver {
    fn derive(&self, public_key: &PublicKey) -> Result<Address, AddressDerivationError> {
        let key_bytes = hex::decode(public_key.as_str())
            .map_err(|_| AddressDerivationError::InvalidHex(public_key.as_str().to_string()))?;

        let key_hash = Sha256::digest(&key_bytes);

        let mut payload = Vec::with_capacity(25);
        payload.push(self.network.version_byte());
        payload.extend_from_slice(&key_hash[..20]);

        let checksum = Sha256::digest(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Ok(Address::new(hex::encode_upper(payload)))
    }
}

/// Explicit key -> address map, for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticAddressBook {
    entries: HashMap<PublicKey, Address>,
}

impl StaticAddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, public_key: PublicKey, address: Address) -> Self {
        self.entries.insert(public_key, address);
        self
    }
}

impl AddressDeriver for StaticAddressBook {
    fn derive(&self, public_key: &PublicKey) -> Result<Address, AddressDerivationError> {
        self.entries
            .get(public_key)
            .cloned()
            .ok_or_else(|| AddressDerivationError::UnknownKey(public_key.as_str().to_string()))
    }
}
