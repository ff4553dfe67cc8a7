//! RwLock-backed implementation of the ledger storage port

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use core_kernel::{AccountId, StoreError, TransactionId};
use domain_ledger::account::{Account, AccountType};
use domain_ledger::store::LedgerStore;
use domain_ledger::transaction::{Posting, Transaction};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    /// Name index enforcing global account-name uniqueness
    names: HashMap<String, AccountId>,
    transactions: HashMap<TransactionId, Transaction>,
    /// Committed postings indexed by account
    postings_by_account: HashMap<AccountId, Vec<Posting>>,
}

/// In-memory ledger store
///
/// Each commit runs under the write lock, so a transaction's postings
/// become visible all at once. Readers take the read lock and only ever
/// observe fully committed state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::internal("storage lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::internal("storage lock poisoned"))
    }
}

impl LedgerStore for MemoryStore {
    fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut inner = self.write()?;

        if inner.names.contains_key(&account.name) {
            return Err(StoreError::conflict(format!(
                "account name already taken: {}",
                account.name
            )));
        }
        if inner.accounts.contains_key(&account.id) {
            return Err(StoreError::conflict(format!(
                "account already registered: {}",
                account.id
            )));
        }

        inner.names.insert(account.name.clone(), account.id);
        inner.accounts.insert(account.id, account.clone());
        debug!(account = %account.id, "account stored");

        Ok(())
    }

    fn account(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.read()?.accounts.get(id).cloned())
    }

    fn account_by_name(&self, name: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .names
            .get(name)
            .and_then(|id| inner.accounts.get(id))
            .cloned())
    }

    fn accounts_of_type(&self, account_type: AccountType) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .read()?
            .accounts
            .values()
            .filter(|account| account.account_type == account_type)
            .cloned()
            .collect())
    }

    fn commit_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        // One write-lock critical section per commit: the whole posting set
        // lands atomically and no reader can interleave.
        let mut inner = self.write()?;

        if inner.transactions.contains_key(&transaction.id()) {
            return Err(StoreError::conflict(format!(
                "transaction already committed: {}",
                transaction.id()
            )));
        }

        for posting in transaction.postings() {
            if !inner.accounts.contains_key(&posting.account_id) {
                return Err(StoreError::not_found("Account", posting.account_id));
            }
        }

        for posting in transaction.postings() {
            inner
                .postings_by_account
                .entry(posting.account_id)
                .or_default()
                .push(posting.clone());
        }
        inner
            .transactions
            .insert(transaction.id(), transaction.clone());
        debug!(transaction = %transaction.id(), "transaction stored");

        Ok(())
    }

    fn transaction(&self, id: &TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.read()?.transactions.get(id).cloned())
    }

    fn postings_for_account(&self, id: &AccountId) -> Result<Vec<Posting>, StoreError> {
        Ok(self
            .read()?
            .postings_by_account
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn accounts_with_postings(&self) -> Result<Vec<(Account, Vec<Posting>)>, StoreError> {
        // One read-lock critical section: commits land under the write
        // lock, so the snapshot holds whole transactions only.
        let inner = self.read()?;
        Ok(inner
            .accounts
            .values()
            .map(|account| {
                let postings = inner
                    .postings_by_account
                    .get(&account.id)
                    .cloned()
                    .unwrap_or_default();
                (account.clone(), postings)
            })
            .collect())
    }
}
