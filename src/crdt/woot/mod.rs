//! WOOT Text CRDT: Collaborative text editing without operational transformation
//!
//! This module implements WOOT (WithOut Operational Transformation), a
//! character-level sequence CRDT. Replicas apply local edits immediately and
//! exchange operations that commute, so every replica converges to the same
//! text whatever the delivery order, as long as each operation eventually
//! arrives.
//!
//! # Algorithm
//!
//! - Every character is an atom named by a `(site, clock)` identifier and
//!   remembers the neighbors its author saw when inserting it
//! - Deleted atoms become tombstones and keep serving as anchors
//! - An operation whose anchors are missing waits in a pending pool
//! - Concurrent inserts into the same gap are ordered by identifier,
//!   recursing into narrower gaps until the slot is unambiguous
//!
//! # Example
//!
//! ```rust
//! use woot_core::crdt::woot::{outgoing, WootText};
//!
//! let mut text1 = WootText::new("client1");
//! let mut text2 = WootText::new("client2");
//!
//! // Concurrent inserts at same position
//! let ops1 = outgoing(&text1.insert(0, "Hello").unwrap());
//! let ops2 = outgoing(&text2.insert(0, "World").unwrap());
//!
//! // Exchange operations
//! for op in ops2 {
//!     text1.receive(op).unwrap();
//! }
//! for op in ops1 {
//!     text2.receive(op).unwrap();
//! }
//!
//! // Both replicas converge to same result
//! assert_eq!(text1.value(), text2.value());
//! ```
//!
//! # References
//!
//! - **Paper**: "Data Consistency for P2P Collaborative Editing" (Oster et al., CSCW 2006)
//!
//! Tombstones are never collected, so a document grows with every insert ever made.

mod atom;
mod effect;
mod id;
mod operation;
mod sequence;
mod text;

#[cfg(test)]
mod proptests;

pub use atom::Atom;
pub use effect::{outgoing, Effect};
pub use id::{Identifier, SiteId};
pub use operation::Operation;
pub use sequence::Sequence;
pub use text::WootText;
