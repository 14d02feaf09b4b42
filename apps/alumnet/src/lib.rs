//! # Alumnet Library
//!
//! This library exposes the Alumnet app modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod error;

// Re-export alumnet_core for convenience
pub use alumnet_core;
