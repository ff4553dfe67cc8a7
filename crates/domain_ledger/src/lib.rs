//! Ledger Domain - Double-Entry Bookkeeping Core
//!
//! This crate implements a strict double-entry bookkeeping system, ensuring
//! financial integrity for all recorded transactions.
//!
//! # Double-Entry Accounting Principles
//!
//! Every financial transaction creates balanced debits and credits:
//! - Debits increase asset/expense accounts
//! - Credits increase liability/equity/revenue accounts
//! - The sum of all debits must equal the sum of all credits
//!
//! Account balances are never stored; they are derived on demand from the
//! committed posting set, so the accounting equation
//! (Assets = Liabilities + Equity + Revenue - Expenses) holds after every
//! commit. The [`Ledger::trial_balance`] diagnostic recomputes the equation
//! residual across the whole ledger and returns zero for a healthy ledger.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{AccountType, Ledger, TransactionDraft};
//!
//! let ledger = Ledger::new(store);
//!
//! let cash = ledger.create_account("Cash", AccountType::Asset, false)?;
//! let capital = ledger.create_account("Capital", AccountType::Equity, false)?;
//!
//! let draft = TransactionDraft::new("Initial investment")
//!     .debit(cash.id, dec!(500))
//!     .credit(capital.id, dec!(500));
//!
//! ledger.post(draft)?;
//! assert_eq!(ledger.trial_balance(None)?, Decimal::ZERO);
//! ```

pub mod account;
pub mod error;
pub mod ledger;
pub mod store;
pub mod transaction;

pub use account::{Account, AccountType, Side};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use store::LedgerStore;
pub use transaction::{Posting, Transaction, TransactionDraft, MIN_POSTINGS};
