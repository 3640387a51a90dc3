//! Domain types: addresses, assets, transactions, account views.

pub mod account;
pub mod asset;
pub mod primitives;
pub mod transaction;

pub use account::{
    AccountState, Balance, DivisibleBalance, MosaicBalance, ReconciliationResult,
    NATIVE_DIVISIBILITY,
};
pub use asset::{flatten_mosaics, AssetKey, MosaicId, RawMosaic};
pub use primitives::{Address, PublicKey};
pub use transaction::{PendingTransaction, TransactionEvent};
