//! Effects: What a replica reports back to its host
//!
//! - `Operation`: a locally generated operation the transport must broadcast
//! - `Insert` / `Delete`: changes an editor view applies to its buffer, using
//!   visible (editor-style) indices rather than physical ones

use super::operation::Operation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Broadcast this operation to every other replica
    Operation { op: Operation },

    /// `value` became visible at `index`
    Insert { value: char, index: usize },

    /// The character `value` at `index` disappeared
    Delete { value: char, index: usize },
}

impl Effect {
    /// The operation to broadcast, if this is an outgoing operation
    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Effect::Operation { op } => Some(op),
            _ => None,
        }
    }
}

/// Collect the outgoing operations from a batch of effects
pub fn outgoing(effects: &[Effect]) -> Vec<Operation> {
    effects
        .iter()
        .filter_map(Effect::as_operation)
        .cloned()
        .collect()
}
