//! Wire encoding for operations and effects
//!
//! Operations travel between replicas as JSON. Decoding rebuilds every
//! embedded identifier as a typed `Identifier`, so a decoded operation can be
//! handed straight to `WootText::receive`.

use crate::crdt::woot::{Effect, Operation};
use crate::error::{Result, WootError};

/// Encode an operation for the transport
pub fn encode_operation(op: &Operation) -> Result<String> {
    serde_json::to_string(op).map_err(WootError::Serialization)
}

/// Decode an operation received from the transport
pub fn decode_operation(data: &str) -> Result<Operation> {
    serde_json::from_str(data).map_err(WootError::Deserialization)
}

/// Encode a batch of effects as a JSON array
pub fn encode_effects(effects: &[Effect]) -> Result<String> {
    serde_json::to_string(effects).map_err(WootError::Serialization)
}
