//! Transaction and posting types
//!
//! A transaction moves through two states: a mutable [`TransactionDraft`]
//! being assembled by the caller, and an immutable committed
//! [`Transaction`]. Only committed transactions are visible to balance
//! queries; drafts live on the caller's stack and touch no shared state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, PostingId, TransactionId};

use crate::account::Side;
use crate::error::LedgerError;

/// Minimum number of postings for a committable transaction
pub const MIN_POSTINGS: usize = 2;

/// A single debit or credit line item within a transaction
///
/// Postings are created only as part of a draft and become immutable when
/// the owning transaction commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    /// Unique posting identifier
    pub id: PostingId,
    /// Account the amount is posted against
    pub account_id: AccountId,
    /// Debit or credit
    pub side: Side,
    /// Magnitude (must be positive)
    pub amount: Decimal,
    /// Optional description for this line
    pub description: Option<String>,
}

impl Posting {
    /// Creates a posting on the given side
    pub fn new(account_id: AccountId, side: Side, amount: Decimal) -> Self {
        Self {
            id: PostingId::new_v7(),
            account_id,
            side,
            amount,
            description: None,
        }
    }

    /// Creates a debit posting
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self::new(account_id, Side::Debit, amount)
    }

    /// Creates a credit posting
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self::new(account_id, Side::Credit, amount)
    }

    /// Adds a description to the posting
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A transaction under construction
///
/// Drafts collect postings through the builder API and are handed to
/// [`crate::Ledger::post`] for validation and atomic commit. A draft is
/// never visible to balance queries.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    description: String,
    occurred_at: Option<DateTime<Utc>>,
    postings: Vec<Posting>,
}

impl TransactionDraft {
    /// Starts a new draft
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            occurred_at: None,
            postings: Vec::new(),
        }
    }

    /// Sets the time the underlying financial event occurred
    pub fn occurred(mut self, at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(at);
        self
    }

    /// Adds a debit posting
    pub fn debit(mut self, account_id: AccountId, amount: Decimal) -> Self {
        self.postings.push(Posting::debit(account_id, amount));
        self
    }

    /// Adds a credit posting
    pub fn credit(mut self, account_id: AccountId, amount: Decimal) -> Self {
        self.postings.push(Posting::credit(account_id, amount));
        self
    }

    /// Adds a custom posting
    pub fn posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Returns the draft's description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the postings collected so far
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Returns the debit and credit totals
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Calculation`] if either running total
    /// overflows.
    pub fn totals(&self) -> Result<(Decimal, Decimal), LedgerError> {
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;

        for posting in &self.postings {
            let total = match posting.side {
                Side::Debit => &mut debits,
                Side::Credit => &mut credits,
            };
            *total = total.checked_add(posting.amount).ok_or_else(|| {
                LedgerError::Calculation(format!("{} total overflow", posting.side))
            })?;
        }

        Ok((debits, credits))
    }

    /// Checks whether debit and credit totals match exactly
    pub fn is_balanced(&self) -> bool {
        matches!(self.totals(), Ok((debits, credits)) if debits == credits)
    }

    /// Validates the draft against the double-entry rules
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] if any posting has a non-positive amount
    /// - [`LedgerError::InsufficientPostings`] if there are fewer than two
    ///   postings
    /// - [`LedgerError::UnbalancedTransaction`] if debit and credit totals
    ///   differ (exact decimal comparison, no rounding tolerance)
    pub fn validate(&self) -> Result<(), LedgerError> {
        for posting in &self.postings {
            if posting.amount <= Decimal::ZERO {
                return Err(LedgerError::validation(format!(
                    "posting amount must be positive, got {}",
                    posting.amount
                )));
            }
        }

        if self.postings.len() < MIN_POSTINGS {
            return Err(LedgerError::InsufficientPostings(self.postings.len()));
        }

        let (debits, credits) = self.totals()?;
        if debits != credits {
            return Err(LedgerError::UnbalancedTransaction { debits, credits });
        }

        Ok(())
    }
}

/// A committed, immutable financial transaction
///
/// Instances exist only as the result of posting a validated draft. There
/// is no update or void operation; corrections are new transactions with
/// mirrored postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    occurred_at: DateTime<Utc>,
    postings: Vec<Posting>,
    committed_at: DateTime<Utc>,
}

impl Transaction {
    /// Seals a validated draft into a committed transaction
    ///
    /// Callers must have run [`TransactionDraft::validate`] first; the
    /// ledger service is the only production call site.
    pub(crate) fn seal(draft: TransactionDraft, id: TransactionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            description: draft.description,
            occurred_at: draft.occurred_at.unwrap_or(now),
            postings: draft.postings,
            committed_at: now,
        }
    }

    /// Returns the transaction identifier
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the underlying financial event occurred
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the postings
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Returns when the transaction was committed
    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }
}
