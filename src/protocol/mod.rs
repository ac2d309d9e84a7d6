//! Protocol: Everything that crosses the engine boundary as data
//!
//! - `serialize`: JSON wire encoding for operations and effects
//! - `snapshot`: the persisted form of a replica

pub mod serialize;
pub mod snapshot;

pub use serialize::{decode_operation, encode_effects, encode_operation};
pub use snapshot::Snapshot;
