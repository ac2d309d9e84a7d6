//! CRDT (Conflict-free Replicated Data Types) implementations
//!
//! This module contains the replicated data structures of the crate.
//!
//! # CRDTs Implemented
//!
//! - **WOOT Text:** Character sequence for collaborative text editing
//!
//! # References
//!
//! - "A comprehensive study of CRDTs" by Marc Shapiro et al.
//! - "Data Consistency for P2P Collaborative Editing" by Oster, Urso, Molli and Imine

pub mod woot;

pub use woot::WootText;
