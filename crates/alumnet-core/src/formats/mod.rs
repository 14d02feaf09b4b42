//! # Formats Module
//!
//! Serialization and format handling for ledgers.
//!
//! This module contains:
//! - Binary ledger snapshots (postcard + header)
//!
//! Note: File I/O operations remain in the app layer (apps/alumnet).
//! This module only handles format conversion (pure transformations).

mod persistence;

pub use persistence::*;
