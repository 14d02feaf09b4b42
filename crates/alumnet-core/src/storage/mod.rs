//! # Storage Module
//!
//! Durable ledger storage using redb.
//!
//! Uses redb embedded database for:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - Serialized writers, which makes check-and-insert atomic

mod redb_ledger;

pub use redb_ledger::RedbLedger;
