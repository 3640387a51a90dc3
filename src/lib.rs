pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod network;
pub mod nis;
pub mod processor;
pub mod transport;

pub use config::Config;
pub use db::{init_db, AccountRepository};
pub use domain::{
    AccountState, Address, AssetKey, Balance, MosaicBalance, PendingTransaction, PublicKey,
    RawMosaic, ReconciliationResult, TransactionEvent,
};
pub use error::AppError;
pub use network::{AddressDeriver, NetworkAddressDeriver, NetworkId, StaticAddressBook};
pub use nis::{MockNodeClient, NisNodeClient, NodeClient, NodeClientError};
pub use processor::{run_consumer, Reconciler};
pub use transport::{ChannelPublisher, EventPublisher, TopicScheme};
