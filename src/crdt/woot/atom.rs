//! Atom: The character record of the WOOT sequence
//!
//! Each atom carries:
//! - Unique ID
//! - Value (one character, none for the sentinels)
//! - The neighbors its author saw when inserting it
//! - Visible flag (tombstone once cleared)

use super::id::Identifier;
use serde::{Deserialize, Serialize};

/// A single character in the WOOT sequence
///
/// `prev_id`/`next_id` record the causal neighbors at insertion time and are
/// never updated, even when other atoms are later integrated between them.
/// Atoms are never removed; deletion only clears `visible`, and a cleared
/// flag is never set again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Unique identifier for this atom
    pub id: Identifier,

    /// The character (None for the sentinels)
    pub value: Option<char>,

    /// Whether this atom is still part of the visible text
    pub visible: bool,

    /// Atom this was inserted after
    #[serde(default)]
    pub prev_id: Option<Identifier>,

    /// Atom this was inserted before
    #[serde(default)]
    pub next_id: Option<Identifier>,
}

impl Atom {
    /// Create a new visible atom
    pub fn new(id: Identifier, value: char, prev_id: Identifier, next_id: Identifier) -> Self {
        Self {
            id,
            value: Some(value),
            visible: true,
            prev_id: Some(prev_id),
            next_id: Some(next_id),
        }
    }

    /// The atom marking the beginning of every document
    pub fn start_sentinel() -> Self {
        Self::sentinel(Identifier::start())
    }

    /// The atom marking the end of every document
    pub fn end_sentinel() -> Self {
        Self::sentinel(Identifier::end())
    }

    fn sentinel(id: Identifier) -> Self {
        Self {
            id,
            value: None,
            visible: true,
            prev_id: None,
            next_id: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_sentinel()
    }

    /// Check if this atom counts toward the user-facing text
    ///
    /// Sentinels are never part of the text even though they are never deleted.
    pub fn is_visible(&self) -> bool {
        self.visible && !self.is_sentinel()
    }

    /// Tombstone this atom
    pub fn hide(&mut self) {
        self.visible = false;
    }
}
