//! Account taxonomy and balance orientation
//!
//! This module defines the five-kind account taxonomy for double-entry
//! bookkeeping and the polarity rules that decide whether a posting adds to
//! or subtracts from an account's balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::AccountId;

use crate::error::LedgerError;
use crate::transaction::Posting;

/// The side of the books a posting lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Debit (left side)
    Debit,
    /// Credit (right side)
    Credit,
}

impl Side {
    /// Returns the opposing side
    pub fn opposite(&self) -> Side {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Debit => write!(f, "debit"),
            Side::Credit => write!(f, "credit"),
        }
    }
}

/// Kinds of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// All five account kinds, in accounting-equation order
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    /// Returns the side on which this kind of account naturally
    /// accumulates value
    pub fn normal_balance(&self) -> Side {
        match self {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => Side::Credit,
        }
    }

    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        self.normal_balance() == Side::Debit
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Asset => write!(f, "Asset"),
            AccountType::Liability => write!(f, "Liability"),
            AccountType::Equity => write!(f, "Equity"),
            AccountType::Revenue => write!(f, "Revenue"),
            AccountType::Expense => write!(f, "Expense"),
        }
    }
}

/// A named, typed ledger entity
///
/// Identity (name and type) is fixed at creation. The balance is never a
/// stored field; it is computed from the committed postings that reference
/// the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Globally unique account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Whether the effective balance orientation is inverted
    pub contra: bool,
    /// Description
    pub description: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with the default (non-contra) orientation
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `name` - Account name
    /// * `account_type` - Kind of account
    pub fn new(id: AccountId, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
            contra: false,
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Marks the account as a contra account, inverting its balance
    /// orientation relative to its type
    pub fn contra(mut self) -> Self {
        self.contra = true;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the side on which this account accumulates value,
    /// accounting for the contra flag
    pub fn effective_normal_balance(&self) -> Side {
        if self.contra {
            self.account_type.normal_balance().opposite()
        } else {
            self.account_type.normal_balance()
        }
    }

    /// Computes the account balance from its committed postings
    ///
    /// Amounts posted on the effective normal side add to the balance;
    /// amounts on the opposite side subtract from it. The slice must contain
    /// only postings that reference this account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Calculation`] if the running sum overflows.
    pub fn balance_from_postings(&self, postings: &[Posting]) -> Result<Decimal, LedgerError> {
        let normal = self.effective_normal_balance();
        let mut balance = Decimal::ZERO;

        for posting in postings {
            balance = if posting.side == normal {
                balance.checked_add(posting.amount)
            } else {
                balance.checked_sub(posting.amount)
            }
            .ok_or_else(|| {
                LedgerError::Calculation(format!("balance overflow on account {}", self.id))
            })?;
        }

        Ok(balance)
    }
}
