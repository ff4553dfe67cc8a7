//! Double-entry ledger service
//!
//! The [`Ledger`] is the single entry point callers use to register
//! accounts, commit transactions, and query balances. It enforces the
//! double-entry rules, ensuring every committed transaction is balanced
//! and the accounting equation holds across the whole ledger.
//!
//! # Invariants
//!
//! - Every committed transaction balances to zero
//! - Account balances are derived from committed postings, never stored
//! - Committed transactions cannot be modified, only reversed

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use core_kernel::{AccountId, TransactionId};

use crate::account::{Account, AccountType};
use crate::error::LedgerError;
use crate::store::LedgerStore;
use crate::transaction::{Posting, Transaction, TransactionDraft};

/// The ledger service, generic over its storage collaborator
#[derive(Debug)]
pub struct Ledger<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> Ledger<S> {
    /// Creates a ledger backed by the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new account
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if the name is empty or already
    /// taken, whether the duplicate is caught by the pre-check or by the
    /// store's own uniqueness enforcement under concurrency.
    pub fn create_account(
        &self,
        name: impl Into<String>,
        account_type: AccountType,
        contra: bool,
    ) -> Result<Account, LedgerError> {
        self.register(name, account_type, contra, None)
    }

    /// Registers a new account carrying a description
    pub fn create_account_described(
        &self,
        name: impl Into<String>,
        account_type: AccountType,
        contra: bool,
        description: impl Into<String>,
    ) -> Result<Account, LedgerError> {
        self.register(name, account_type, contra, Some(description.into()))
    }

    fn register(
        &self,
        name: impl Into<String>,
        account_type: AccountType,
        contra: bool,
        description: Option<String>,
    ) -> Result<Account, LedgerError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(LedgerError::validation("account name must not be empty"));
        }
        if self.store.account_by_name(&name)?.is_some() {
            return Err(LedgerError::validation(format!(
                "account name already taken: {name}"
            )));
        }

        let mut account = Account::new(AccountId::new_v7(), name, account_type);
        if contra {
            account = account.contra();
        }
        if let Some(description) = description {
            account = account.with_description(description);
        }

        // A registration racing past the pre-check trips the store's own
        // uniqueness enforcement; report it as the same validation failure
        // the pre-check would have produced.
        self.store.insert_account(&account).map_err(|err| {
            if err.is_conflict() {
                LedgerError::validation(format!("account name already taken: {}", account.name))
            } else {
                LedgerError::Store(err)
            }
        })?;
        debug!(account = %account.id, name = %account.name, %account_type, "account registered");

        Ok(account)
    }

    /// Validates a draft and commits it atomically
    ///
    /// All postings become visible together or not at all; on any error no
    /// partial state is observable by balance queries.
    ///
    /// # Errors
    ///
    /// - Draft validation errors ([`LedgerError::InsufficientPostings`],
    ///   [`LedgerError::UnbalancedTransaction`], [`LedgerError::Validation`])
    /// - [`LedgerError::AccountNotFound`] if a posting references an
    ///   unregistered account
    pub fn post(&self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        draft.validate()?;

        for posting in draft.postings() {
            if self.store.account(&posting.account_id)?.is_none() {
                return Err(LedgerError::AccountNotFound(posting.account_id.to_string()));
            }
        }

        let transaction = Transaction::seal(draft, TransactionId::new_v7(), Utc::now());
        self.store.commit_transaction(&transaction)?;
        debug!(
            transaction = %transaction.id(),
            postings = transaction.postings().len(),
            "transaction committed"
        );

        Ok(transaction)
    }

    /// Commits a new transaction mirroring a previous one
    ///
    /// Committed transactions are never mutated; this is the only
    /// correction mechanism. Each posting of the original reappears with
    /// debit and credit swapped.
    pub fn reverse(
        &self,
        id: &TransactionId,
        reason: &str,
    ) -> Result<Transaction, LedgerError> {
        let original = self
            .store
            .transaction(id)?
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;

        let mut draft = TransactionDraft::new(format!("Reversal of {id}: {reason}"));
        for posting in original.postings() {
            draft = draft.posting(
                Posting::new(posting.account_id, posting.side.opposite(), posting.amount)
                    .with_description(format!("Reversal: {reason}")),
            );
        }

        self.post(draft)
    }

    /// Computes an account's current balance from its committed postings
    ///
    /// Always recomputed, never cached; idempotent between commits.
    pub fn account_balance(&self, id: &AccountId) -> Result<Decimal, LedgerError> {
        let account = self
            .store
            .account(id)?
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
        let postings = self.store.postings_for_account(id)?;

        account.balance_from_postings(&postings)
    }

    /// Sums the balances of all accounts of one type
    ///
    /// The aggregate is only meaningful for a concrete type; passing `None`
    /// fails with [`LedgerError::InvalidOperation`].
    pub fn type_balance(&self, account_type: Option<AccountType>) -> Result<Decimal, LedgerError> {
        let Some(account_type) = account_type else {
            return Err(LedgerError::invalid_operation(
                "ambiguous aggregate: no type specified",
            ));
        };

        let snapshot = self.store.accounts_with_postings()?;
        Self::sum_type(&snapshot, account_type)
    }

    fn sum_type(
        snapshot: &[(Account, Vec<Posting>)],
        account_type: AccountType,
    ) -> Result<Decimal, LedgerError> {
        let mut total = Decimal::ZERO;
        for (account, postings) in snapshot {
            if account.account_type != account_type {
                continue;
            }
            let balance = account.balance_from_postings(postings)?;
            total = total.checked_add(balance).ok_or_else(|| {
                LedgerError::Calculation(format!("{account_type} aggregate overflow"))
            })?;
        }

        Ok(total)
    }

    /// Computes the accounting-equation residual across the whole ledger
    ///
    /// Returns `Assets - (Liabilities + Equity + Revenue - Expenses)`,
    /// which is exactly zero for any ledger holding only balanced committed
    /// transactions. A nonzero result is a data-integrity fault to be
    /// investigated by an operator, not a condition callers branch on.
    ///
    /// The check is only meaningful at the ledger root; scoping it to a
    /// concrete account type fails with [`LedgerError::InvalidOperation`],
    /// mirroring the per-type ambiguity guard on [`Ledger::type_balance`].
    /// Pass `None`.
    pub fn trial_balance(&self, scope: Option<AccountType>) -> Result<Decimal, LedgerError> {
        if let Some(account_type) = scope {
            return Err(LedgerError::invalid_operation(format!(
                "trial balance applies to the whole ledger, not to {account_type} accounts"
            )));
        }

        // A single snapshot backs all five aggregates: a commit landing
        // mid-computation is either wholly in or wholly out, so the residual
        // is never torn across account types.
        let snapshot = self.store.accounts_with_postings()?;

        let assets = Self::sum_type(&snapshot, AccountType::Asset)?;
        let liabilities = Self::sum_type(&snapshot, AccountType::Liability)?;
        let equity = Self::sum_type(&snapshot, AccountType::Equity)?;
        let revenue = Self::sum_type(&snapshot, AccountType::Revenue)?;
        let expenses = Self::sum_type(&snapshot, AccountType::Expense)?;

        let credit_side = liabilities
            .checked_add(equity)
            .and_then(|total| total.checked_add(revenue))
            .and_then(|total| total.checked_sub(expenses))
            .ok_or_else(|| LedgerError::Calculation("trial balance overflow".to_string()))?;
        let residual = assets
            .checked_sub(credit_side)
            .ok_or_else(|| LedgerError::Calculation("trial balance overflow".to_string()))?;
        if !residual.is_zero() {
            warn!(%residual, "trial balance is nonzero; ledger integrity fault");
        }

        Ok(residual)
    }
}
