//! In-memory adapter for the ledger storage port
//!
//! Provides [`MemoryStore`], a thread-safe implementation of
//! `domain_ledger::LedgerStore` backed by `RwLock`-guarded maps. The write
//! lock makes each transaction commit atomic and isolated; read locks give
//! balance queries a consistent committed snapshot.

pub mod store;

pub use store::MemoryStore;
