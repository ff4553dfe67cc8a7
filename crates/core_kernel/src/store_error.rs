//! Error type for storage-port operations
//!
//! The ledger core delegates durable record keeping to a storage
//! collaborator. Every implementation of the storage port reports failures
//! through this one type, so the domain layer can propagate them unchanged
//! regardless of which adapter is behind the port.

use std::fmt;
use thiserror::Error;

/// Error returned by storage-port implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found
    #[error("not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The write conflicts with existing data (e.g. a uniqueness violation)
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The underlying storage failed mid-operation
    #[error("internal storage error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error indicates a write conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}
