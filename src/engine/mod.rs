//! Balance reconciliation computation: pending deltas, relevant-asset
//! selection, and the confirmed/unconfirmed merge. Pure except for skip
//! warnings; all I/O lives in the callers.

pub mod delta;
pub mod merge;
pub mod relevance;

pub use delta::{pending_delta, PendingDelta};
pub use merge::merge_balances;
pub use relevance::relevant_asset_keys;
