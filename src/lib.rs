//! Woot Core - Collaborative text replication engine
//!
//! This is the Rust core of a WOOT text CRDT, compiled to both native and WASM.
//! It implements:
//! - Identifier assignment and total ordering across replicas
//! - Tombstone-based character sequence
//! - Causal buffering of operations that arrive early
//! - Deterministic placement of concurrent inserts
//! - JSON wire and snapshot formats
//!
//! # Examples
//!
//! ```rust
//! use woot_core::{Effect, WootText};
//!
//! let mut doc = WootText::new("site-1");
//! let effects = doc.insert(0, "Hello World").unwrap();
//!
//! assert_eq!(doc.value(), "Hello World");
//! assert!(matches!(effects[0], Effect::Insert { value: 'H', index: 0 }));
//! ```

pub mod crdt;
pub mod error;
pub mod protocol;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use crdt::woot::{Effect, Identifier, Operation, SiteId, WootText};
pub use error::{Result, WootError};
pub use protocol::Snapshot;
