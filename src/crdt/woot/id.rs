//! Identifier: Unique, totally ordered name for every character
//!
//! Each atom in the WOOT sequence is named by:
//! - Site: Identifies the replica that created the atom
//! - Clock: Per-site counter, incremented on every local insert
//!
//! The two sentinel atoms use the null site (`None`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Replica identifier
///
/// Site IDs must be drawn from one consistently ordered domain and never be
/// reused for two different replicas. Ordering is lexicographic, so every
/// replica compares any two site IDs the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Create a site ID from an externally assigned name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a random site ID (UUID v4)
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an atom
///
/// Combines site and clock for a total order that is the same on every
/// replica. Identifiers from different sites are ordered by site; from the
/// same site by clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Site that created the atom (`None` for the sentinels)
    ///
    /// Required on the wire: an explicit `null` is a sentinel, a missing
    /// field is a malformed identifier.
    #[serde(deserialize_with = "Option::deserialize")]
    pub site: Option<SiteId>,

    /// Site-local clock at creation time
    pub clock: u64,
}

impl Identifier {
    /// Create a new identifier for an ordinary atom
    pub fn new(site: SiteId, clock: u64) -> Self {
        Self {
            site: Some(site),
            clock,
        }
    }

    /// Identifier of the start sentinel
    pub fn start() -> Self {
        Self {
            site: None,
            clock: 0,
        }
    }

    /// Identifier of the end sentinel
    pub fn end() -> Self {
        Self {
            site: None,
            clock: 1,
        }
    }

    /// Check if this identifier names one of the two sentinels
    pub fn is_sentinel(&self) -> bool {
        self.site.is_none()
    }

    /// Check if this identifier was minted by `site`
    pub fn is_from(&self, site: &SiteId) -> bool {
        self.site.as_ref() == Some(site)
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Site first, then clock within the same site
        match self.site.cmp(&other.site) {
            Ordering::Equal => self.clock.cmp(&other.clock),
            other => other,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.site {
            Some(site) => write!(f, "{}:{}", site, self.clock),
            None => write!(f, "sentinel:{}", self.clock),
        }
    }
}
