//! Error types for the WOOT engine
//!
//! Unresolved causality is never an error: an operation whose prerequisites
//! are missing waits in the pending pool. Errors signal protocol violations
//! and broken persisted state.

use crate::crdt::woot::Identifier;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WootError {
    /// A delete named one of the two sentinels
    #[error("Cannot delete sentinel atom {0}")]
    SentinelDeletion(Identifier),

    /// An operation no well-behaved replica could have produced
    #[error("Malformed operation {id}: {reason}")]
    MalformedOperation {
        id: Identifier,
        reason: &'static str,
    },

    /// An executable operation referenced an atom that is not present
    #[error("Atom not found: {0}")]
    AtomNotFound(Identifier),

    #[error("Serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Malformed JSON, missing fields or a broken identifier shape
    #[error("Deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Well-formed JSON describing an impossible document
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, WootError>;
