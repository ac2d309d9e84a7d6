//! Operation: The unit exchanged between replicas

use super::id::Identifier;
use serde::{Deserialize, Serialize};

/// An insert or delete, immutable once created
///
/// Re-delivering an operation is always safe: inserts of an already present
/// atom are ignored and deletes are idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Insert {
        id: Identifier,
        value: char,
        prev_id: Identifier,
        next_id: Identifier,
    },
    Delete {
        id: Identifier,
    },
}

impl Operation {
    /// The atom this operation creates or deletes
    pub fn id(&self) -> &Identifier {
        match self {
            Operation::Insert { id, .. } | Operation::Delete { id } => id,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Operation::Delete { .. })
    }

    /// Identifiers that must be present locally before this operation can run
    pub fn prerequisites(&self) -> Vec<&Identifier> {
        match self {
            Operation::Insert {
                prev_id, next_id, ..
            } => vec![prev_id, next_id],
            Operation::Delete { id } => vec![id],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::woot::id::SiteId;

    #[test]
    fn test_prerequisites() {
        let id = Identifier::new(SiteId::from("a"), 0);
        let insert = Operation::Insert {
            id: id.clone(),
            value: 'x',
            prev_id: Identifier::start(),
            next_id: Identifier::end(),
        };
        assert_eq!(
            insert.prerequisites(),
            vec![&Identifier::start(), &Identifier::end()]
        );
        assert!(!insert.is_delete());

        let delete = Operation::Delete { id: id.clone() };
        assert_eq!(delete.prerequisites(), vec![&id]);
        assert!(delete.is_delete());
        assert_eq!(delete.id(), insert.id());
    }

    #[test]
    fn test_wire_shape() {
        let delete = Operation::Delete {
            id: Identifier::new(SiteId::from("a"), 7),
        };
        let json = serde_json::to_value(&delete).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "delete", "id": {"site": "a", "clock": 7}})
        );
    }
}
