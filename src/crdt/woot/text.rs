//! WootText: The replicated character sequence
//!
//! This module implements the WOOT engine:
//! - Causal gating: operations wait in a pending pool until the atoms they
//!   reference are present
//! - Integration: concurrent inserts into the same gap are ordered by
//!   identifier, narrowing the gap until the slot is unambiguous
//! - Tombstone deletion: deleted atoms stay in place as anchors
//! - Editor surface: insert/delete/replace by visible index
//!
//! Local edits go through the same `receive` path as remote operations.

use super::atom::Atom;
use super::effect::Effect;
use super::id::{Identifier, SiteId};
use super::operation::Operation;
use super::sequence::Sequence;
use crate::error::{Result, WootError};
use crate::protocol::snapshot::Snapshot;
use tracing::{debug, trace, warn};

/// WOOT Text CRDT
///
/// One replica of a shared document. Every mutating call returns the effects
/// it produced, in order: operations to broadcast and changes to the visible
/// text.
///
/// # Example
///
/// ```rust
/// use woot_core::crdt::woot::{outgoing, WootText};
///
/// let mut alice = WootText::new("alice");
/// let mut bob = WootText::new("bob");
///
/// let effects = alice.insert(0, "Hello").unwrap();
/// for op in outgoing(&effects) {
///     bob.receive(op).unwrap();
/// }
///
/// assert_eq!(bob.value(), "Hello");
/// ```
#[derive(Debug, Clone)]
pub struct WootText {
    /// Replica identifier
    site: SiteId,

    /// Clock for the next locally minted identifier
    clock: u64,

    /// Atoms in document order, tombstones included
    chars: Sequence,

    /// Operations waiting for their prerequisites
    pool: Vec<Operation>,
}

impl WootText {
    /// Create an empty document owned by `site`
    pub fn new(site: impl Into<SiteId>) -> Self {
        Self {
            site: site.into(),
            clock: 0,
            chars: Sequence::new(),
            pool: Vec::new(),
        }
    }

    /// Create an empty document with a random site ID
    pub fn with_random_site() -> Self {
        Self::new(SiteId::random())
    }

    /// Create a replica from a snapshot produced by `export_state`
    pub fn from_state(site: impl Into<SiteId>, data: &str) -> Result<Self> {
        let mut text = Self::new(site);
        text.import_state(data)?;
        Ok(text)
    }

    pub fn site(&self) -> &SiteId {
        &self.site
    }

    /// Clock value the next local insert will use
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Number of visible characters
    pub fn len(&self) -> usize {
        self.chars.visible_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible text
    pub fn value(&self) -> String {
        self.chars.text()
    }

    /// Every atom in physical order, sentinels and tombstones included
    pub fn atoms(&self) -> &[Atom] {
        self.chars.atoms()
    }

    /// Operations still waiting for their prerequisites
    pub fn pending(&self) -> &[Operation] {
        &self.pool
    }

    /// Accept a local or remote operation
    ///
    /// Executes the operation if its prerequisites are present, otherwise
    /// parks it in the pending pool. Each execution may release pooled
    /// operations, which run in the same call.
    ///
    /// # Errors
    ///
    /// Returns `WootError::SentinelDeletion` for a delete that names a
    /// sentinel and `WootError::MalformedOperation` for an insert minted with
    /// the sentinel site or with its anchors in the wrong order. The
    /// operation is dropped.
    pub fn receive(&mut self, operation: Operation) -> Result<Vec<Effect>> {
        match &operation {
            Operation::Delete { id } if id.is_sentinel() => {
                warn!(%id, "rejecting delete of sentinel");
                return Err(WootError::SentinelDeletion(id.clone()));
            }
            Operation::Insert { id, .. } if id.is_sentinel() => {
                warn!(%id, "rejecting insert with sentinel identifier");
                return Err(WootError::MalformedOperation {
                    id: id.clone(),
                    reason: "insert uses the sentinel site",
                });
            }
            _ => {}
        }

        let mut effects = Vec::new();
        if self.is_executable(&operation) {
            self.execute(operation, &mut effects)?;
            self.drain_pool(&mut effects)?;
        } else {
            debug!(id = %operation.id(), pending = self.pool.len() + 1, "operation pooled");
            self.pool.push(operation);
        }
        Ok(effects)
    }

    /// Insert `text` at the visible index `position`
    ///
    /// Each character becomes one atom with a fresh identifier. An index past
    /// the end of the text is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use woot_core::crdt::woot::WootText;
    ///
    /// let mut text = WootText::new("client1");
    /// text.insert(0, "Hello").unwrap();
    /// text.insert(5, " World").unwrap();
    ///
    /// assert_eq!(text.value(), "Hello World");
    /// ```
    pub fn insert(&mut self, position: usize, text: &str) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();

        for (offset, value) in text.chars().enumerate() {
            let index = position.saturating_add(offset);
            let Some((prev, next)) = self.chars.anchors_at(index) else {
                debug!(index, len = self.len(), "insert out of range ignored");
                break;
            };

            let op = Operation::Insert {
                id: Identifier::new(self.site.clone(), self.clock),
                value,
                prev_id: prev.id.clone(),
                next_id: next.id.clone(),
            };
            self.clock += 1;

            effects.extend(self.receive(op.clone())?);
            effects.push(Effect::Operation { op });
        }

        Ok(effects)
    }

    /// Delete `length` visible characters starting at `position`
    ///
    /// Characters past the end of the text are skipped.
    pub fn delete(&mut self, position: usize, length: usize) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();

        let end = position.saturating_add(length).min(self.len());

        // Back to front so earlier indices in the range stay valid
        for index in (position..end).rev() {
            let Some(atom) = self.chars.nth_visible(index) else {
                continue;
            };

            let op = Operation::Delete {
                id: atom.id.clone(),
            };
            effects.extend(self.receive(op.clone())?);
            effects.push(Effect::Operation { op });
        }

        Ok(effects)
    }

    /// Replace `length` characters at `position` with `text`
    ///
    /// A delete followed by an insert, not an atomic operation.
    pub fn replace(&mut self, position: usize, length: usize, text: &str) -> Result<Vec<Effect>> {
        let mut effects = self.delete(position, length)?;
        effects.extend(self.insert(position, text)?);
        Ok(effects)
    }

    /// Replace the whole document with `text`
    pub fn set_value(&mut self, text: &str) -> Result<Vec<Effect>> {
        self.replace(0, self.len(), text)
    }

    /// Capture container and pool
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            chars: self.chars.atoms().to_vec(),
            pool: self.pool.clone(),
        }
    }

    /// Serialize container and pool to JSON
    pub fn export_state(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Replace container and pool with a serialized snapshot
    ///
    /// The snapshot is trusted: its operations are not re-run. The local
    /// clock moves past any identifier this site already minted in it.
    pub fn import_state(&mut self, data: &str) -> Result<()> {
        self.restore(Snapshot::from_json(data)?)
    }

    /// Replace container and pool with a snapshot
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;

        let next_clock = snapshot
            .chars
            .iter()
            .map(|atom| &atom.id)
            .chain(snapshot.pool.iter().map(Operation::id))
            .filter(|id| id.is_from(&self.site))
            .map(|id| id.clock + 1)
            .max()
            .unwrap_or(0);
        self.clock = self.clock.max(next_clock);

        debug!(
            atoms = snapshot.chars.len(),
            pending = snapshot.pool.len(),
            clock = self.clock,
            "state imported"
        );
        self.chars = Sequence::from_atoms(snapshot.chars);
        self.pool = snapshot.pool;
        Ok(())
    }

    fn is_executable(&self, operation: &Operation) -> bool {
        operation
            .prerequisites()
            .into_iter()
            .all(|id| self.chars.contains(id))
    }

    fn execute(&mut self, operation: Operation, effects: &mut Vec<Effect>) -> Result<()> {
        match operation {
            Operation::Insert {
                id,
                value,
                prev_id,
                next_id,
            } => self.integrate_insert(Atom::new(id, value, prev_id, next_id), effects),
            Operation::Delete { id } => self.integrate_delete(&id, effects),
        }
    }

    /// Run pooled operations until none is executable
    fn drain_pool(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        while let Some(index) = self.pool.iter().position(|op| self.is_executable(op)) {
            let operation = self.pool.remove(index);
            debug!(id = %operation.id(), pending = self.pool.len(), "pooled operation released");
            match self.execute(operation, effects) {
                Err(WootError::MalformedOperation { id, reason }) => {
                    warn!(%id, reason, "dropping malformed pooled operation");
                }
                result => result?,
            }
        }
        Ok(())
    }

    fn integrate_insert(&mut self, atom: Atom, effects: &mut Vec<Effect>) -> Result<()> {
        if self.chars.contains(&atom.id) {
            debug!(id = %atom.id, "duplicate insert ignored");
            return Ok(());
        }

        let (Some(mut prev), Some(mut next)) = (atom.prev_id.clone(), atom.next_id.clone()) else {
            return Err(WootError::AtomNotFound(atom.id));
        };

        let (lower, upper) = (self.chars.index_of(&prev), self.chars.index_of(&next));
        if matches!((lower, upper), (Some(lower), Some(upper)) if lower >= upper) {
            warn!(id = %atom.id, %prev, %next, "rejecting insert with inverted anchors");
            return Err(WootError::MalformedOperation {
                id: atom.id,
                reason: "prev anchor does not precede next anchor",
            });
        }

        loop {
            let lower = self
                .chars
                .index_of(&prev)
                .ok_or_else(|| WootError::AtomNotFound(prev.clone()))?;
            let upper = self
                .chars
                .index_of(&next)
                .ok_or_else(|| WootError::AtomNotFound(next.clone()))?;

            let between = self.chars.slice(lower, upper);
            if between.is_empty() {
                trace!(id = %atom.id, index = upper, "atom placed");
                return self.place(atom, upper, effects);
            }

            // Contenders were inserted directly into this gap: their own
            // anchors enclose it. Anything anchored inside the gap is nested
            // under a contender and is ordered by a deeper step.
            let mut contenders = vec![prev.clone()];
            contenders.extend(
                between
                    .iter()
                    .filter(|candidate| self.encloses(candidate, lower, upper))
                    .map(|candidate| candidate.id.clone()),
            );
            contenders.push(next.clone());

            if contenders.len() == 2 {
                warn!(id = %atom.id, lower, upper, "no contenders in non-empty gap");
                return self.place(atom, upper, effects);
            }

            let mut i = 1;
            while i < contenders.len() - 1 && contenders[i] < atom.id {
                i += 1;
            }

            trace!(id = %atom.id, lower, upper, contenders = contenders.len() - 2, "narrowing gap");
            next = contenders.swap_remove(i);
            prev = contenders.swap_remove(i - 1);
        }
    }

    /// Check whether an atom's recorded anchors lie at or outside `lower..=upper`
    fn encloses(&self, candidate: &Atom, lower: usize, upper: usize) -> bool {
        let position = |id: &Option<Identifier>| id.as_ref().and_then(|id| self.chars.index_of(id));

        match (position(&candidate.prev_id), position(&candidate.next_id)) {
            (Some(prev), Some(next)) => prev <= lower && next >= upper,
            _ => false,
        }
    }

    fn place(&mut self, atom: Atom, index: usize, effects: &mut Vec<Effect>) -> Result<()> {
        let id = atom.id.clone();
        let value = atom.value;
        self.chars.insert_at(atom, index);

        if let (Some(value), Some(index)) = (value, self.chars.visible_index_of(&id)) {
            effects.push(Effect::Insert { value, index });
        }
        Ok(())
    }

    /// Tombstone an atom
    ///
    /// A visible-delete effect is reported only when the atom was authored by
    /// another site; a replica deleting its own characters already knows.
    fn integrate_delete(&mut self, id: &Identifier, effects: &mut Vec<Effect>) -> Result<()> {
        if id.is_sentinel() {
            warn!(%id, "rejecting delete of sentinel");
            return Err(WootError::SentinelDeletion(id.clone()));
        }

        let visible_index = self.chars.visible_index_of(id);
        let atom = self
            .chars
            .find_mut(id)
            .ok_or_else(|| WootError::AtomNotFound(id.clone()))?;

        let announce = atom.is_visible() && !atom.id.is_from(&self.site);
        atom.hide();

        if announce {
            if let (Some(value), Some(index)) = (atom.value, visible_index) {
                effects.push(Effect::Delete { value, index });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for WootText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}
