//! Storage port for the ledger domain
//!
//! The core does not persist anything itself; it requires a storage
//! collaborator implementing [`LedgerStore`]. The port is synchronous:
//! commits are short, bounded units of work with no cancellation semantics.

use core_kernel::{AccountId, StoreError, TransactionId};

use crate::account::{Account, AccountType, Side};
use crate::transaction::{Posting, Transaction};

/// Durable, queryable storage for accounts, transactions, and postings
///
/// # Contract for implementors
///
/// - `insert_account` enforces global uniqueness of account names and
///   fails with [`StoreError::Conflict`] on violation.
/// - `commit_transaction` writes the transaction and all of its postings
///   as one atomic unit with at-least-serializable isolation: no reader
///   may ever observe a subset of a transaction's postings.
/// - Read methods return only fully committed state.
pub trait LedgerStore: Send + Sync {
    /// Registers a new account
    fn insert_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Looks up an account by id
    fn account(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Looks up an account by its unique name
    fn account_by_name(&self, name: &str) -> Result<Option<Account>, StoreError>;

    /// Returns all accounts of the given type
    fn accounts_of_type(&self, account_type: AccountType) -> Result<Vec<Account>, StoreError>;

    /// Atomically persists a committed transaction with all its postings
    fn commit_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Looks up a committed transaction by id
    fn transaction(&self, id: &TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Returns all committed postings referencing the account
    fn postings_for_account(&self, id: &AccountId) -> Result<Vec<Posting>, StoreError>;

    /// Returns every account paired with its committed postings, read as
    /// one consistent snapshot
    ///
    /// Aggregate queries (per-type balances, trial balance) fold over this
    /// snapshot. Implementors must produce it from a single isolated read:
    /// a transaction committed concurrently appears in the snapshot either
    /// with all of its postings or with none of them. Assembling the result
    /// from separate per-account reads would let a commit land between the
    /// reads and show up on one side of the books only.
    fn accounts_with_postings(&self) -> Result<Vec<(Account, Vec<Posting>)>, StoreError>;

    /// Returns the account's committed postings on one side of the books
    fn postings_for_account_on_side(
        &self,
        id: &AccountId,
        side: Side,
    ) -> Result<Vec<Posting>, StoreError> {
        let mut postings = self.postings_for_account(id)?;
        postings.retain(|posting| posting.side == side);
        Ok(postings)
    }
}
