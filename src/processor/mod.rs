//! Event processing: the per-event reconciliation workflow and the bounded
//! consumer loop driving it.

pub mod consumer;
pub mod workflow;

pub use consumer::run_consumer;
pub use workflow::{ReconcileError, Reconciler};
