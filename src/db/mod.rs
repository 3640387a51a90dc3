//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and migrations
//! - SQLite pragma configuration
//! - The account repository (merge-style partial updates)

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::{AccountRecord, AccountRepository};
