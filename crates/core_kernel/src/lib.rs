//! Core Kernel - Foundational types for the ledger system
//!
//! This crate provides the building blocks shared by the domain and
//! infrastructure layers:
//! - Strongly-typed identifiers for ledger entities
//! - The error type returned by storage-port implementations

pub mod identifiers;
pub mod store_error;

pub use identifiers::{AccountId, PostingId, TransactionId};
pub use store_error::StoreError;
