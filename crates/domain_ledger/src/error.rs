//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::StoreError;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input: missing or duplicate name, non-positive amount
    #[error("validation error: {0}")]
    Validation(String),

    /// Debit and credit totals of a transaction differ
    #[error("unbalanced transaction: debits={debits}, credits={credits}")]
    UnbalancedTransaction { debits: Decimal, credits: Decimal },

    /// A transaction was submitted with fewer than two postings
    #[error("insufficient postings: a transaction needs at least two, got {0}")]
    InsufficientPostings(usize),

    /// An aggregate operation was invoked at the wrong scope
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Decimal arithmetic overflowed while aggregating
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Account not found
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Transaction not found
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    /// Storage collaborator failure, propagated unchanged
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        LedgerError::InvalidOperation(message.into())
    }
}
