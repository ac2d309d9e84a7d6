//! Snapshot: Persisted form of a replica
//!
//! The full atom list in physical order (tombstones and sentinels included)
//! plus the pending pool. Loading a snapshot is a trusted bulk replace; it
//! does not replay operations.

use crate::crdt::woot::{Atom, Identifier, Operation};
use crate::error::{Result, WootError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Atoms in physical order
    pub chars: Vec<Atom>,

    /// Operations waiting for their prerequisites
    pub pool: Vec<Operation>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(WootError::Serialization)
    }

    /// Parse a snapshot and check its structure
    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(data).map_err(WootError::Deserialization)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the snapshot describes a document the engine could have built
    pub fn validate(&self) -> Result<()> {
        let (Some(first), Some(last)) = (self.chars.first(), self.chars.last()) else {
            return Err(invalid("atom list is empty"));
        };
        if first.id != Identifier::start() || last.id != Identifier::end() {
            return Err(invalid("atom list must begin and end with the sentinels"));
        }

        let mut seen = HashSet::with_capacity(self.chars.len());
        for atom in &self.chars {
            if !seen.insert(&atom.id) {
                return Err(invalid(format!("duplicate atom {}", atom.id)));
            }
        }
        if self.chars.iter().filter(|atom| atom.is_sentinel()).count() != 2 {
            return Err(invalid("unexpected sentinel inside atom list"));
        }

        // Every anchor must name an atom of this snapshot
        for atom in self.chars.iter().filter(|atom| !atom.is_sentinel()) {
            let (Some(prev), Some(next), Some(_)) = (&atom.prev_id, &atom.next_id, atom.value)
            else {
                return Err(invalid(format!("atom {} is missing its value or anchors", atom.id)));
            };
            if let Some(missing) = [prev, next].into_iter().find(|id| !seen.contains(id)) {
                return Err(invalid(format!(
                    "atom {} is anchored to unknown atom {}",
                    atom.id, missing
                )));
            }
        }

        // Pending operations may not name sentinels as their own atom
        if let Some(op) = self.pool.iter().find(|op| op.id().is_sentinel()) {
            return Err(invalid(format!("pending operation on sentinel {}", op.id())));
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> WootError {
    WootError::InvalidSnapshot(reason.into())
}
