//! Sequence: The ordered atom container the WOOT engine reasons over
//!
//! A plain vector of atoms, always bracketed by the two sentinels. Atoms are
//! only ever spliced in; deletion is a visibility change on the atom itself.
//! All lookups are linear scans.

use super::atom::Atom;
use super::id::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    atoms: Vec<Atom>,
}

impl Sequence {
    /// Create an empty document: `[start, end]`
    pub fn new() -> Self {
        Self {
            atoms: vec![Atom::start_sentinel(), Atom::end_sentinel()],
        }
    }

    /// Wrap an already validated atom list
    pub(crate) fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Physical length, tombstones and sentinels included
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// All atoms in physical order
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index_of(id).is_some()
    }

    /// Physical index of the atom with this identifier
    pub fn index_of(&self, id: &Identifier) -> Option<usize> {
        self.atoms.iter().position(|atom| &atom.id == id)
    }

    pub fn find(&self, id: &Identifier) -> Option<&Atom> {
        self.atoms.iter().find(|atom| &atom.id == id)
    }

    pub fn find_mut(&mut self, id: &Identifier) -> Option<&mut Atom> {
        self.atoms.iter_mut().find(|atom| &atom.id == id)
    }

    /// Index the atom would have among the atoms matching `predicate`
    ///
    /// None if the atom is absent or does not match.
    pub fn filtered_index_of<F>(&self, id: &Identifier, predicate: F) -> Option<usize>
    where
        F: Fn(&Atom) -> bool,
    {
        self.atoms
            .iter()
            .filter(|atom| predicate(*atom))
            .position(|atom| &atom.id == id)
    }

    /// Editor-style index of a visible atom
    pub fn visible_index_of(&self, id: &Identifier) -> Option<usize> {
        self.filtered_index_of(id, Atom::is_visible)
    }

    /// The k-th visible atom (0-based)
    pub fn nth_visible(&self, k: usize) -> Option<&Atom> {
        self.atoms.iter().filter(|atom| atom.is_visible()).nth(k)
    }

    /// Number of visible atoms
    pub fn visible_len(&self) -> usize {
        self.atoms.iter().filter(|atom| atom.is_visible()).count()
    }

    /// Neighbors for inserting at editor position `index`
    ///
    /// Returns the atom that will precede the new character (the start
    /// sentinel at index 0) and the one that will follow it (the end sentinel
    /// at the end of the text). None when `index` is past the end.
    pub fn anchors_at(&self, index: usize) -> Option<(&Atom, &Atom)> {
        let mut anchors = self
            .atoms
            .iter()
            .filter(|atom| atom.is_sentinel() || atom.is_visible())
            .skip(index);
        let prev = anchors.next()?;
        let next = anchors.next()?;
        Some((prev, next))
    }

    /// Splice an atom in at a physical index
    pub fn insert_at(&mut self, atom: Atom, index: usize) {
        self.atoms.insert(index, atom);
    }

    /// Atoms strictly between two physical indices
    ///
    /// Empty when the range is empty or out of bounds.
    pub fn slice(&self, low_exclusive: usize, high_exclusive: usize) -> &[Atom] {
        self.atoms
            .get(low_exclusive + 1..high_exclusive)
            .unwrap_or(&[])
    }

    /// Materialize the visible text
    pub fn text(&self) -> String {
        self.atoms
            .iter()
            .filter(|atom| atom.is_visible())
            .filter_map(|atom| atom.value)
            .collect()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::woot::id::SiteId;

    fn id(clock: u64) -> Identifier {
        Identifier::new(SiteId::from("a"), clock)
    }

    /// "ab" with a tombstoned 'x' between the two letters
    fn sample() -> Sequence {
        let mut seq = Sequence::new();
        seq.insert_at(Atom::new(id(0), 'a', Identifier::start(), Identifier::end()), 1);
        seq.insert_at(Atom::new(id(1), 'x', id(0), Identifier::end()), 2);
        seq.insert_at(Atom::new(id(2), 'b', id(1), Identifier::end()), 3);
        seq.find_mut(&id(1)).unwrap().hide();
        seq
    }

    #[test]
    fn test_new_has_sentinels() {
        let seq = Sequence::new();
        assert_eq!(seq.len(), 2);
        assert!(!seq.is_empty());
        assert_eq!(seq.visible_len(), 0);
        assert_eq!(seq.text(), "");
        assert_eq!(seq.index_of(&Identifier::start()), Some(0));
        assert_eq!(seq.index_of(&Identifier::end()), Some(1));
    }

    #[test]
    fn test_lookup() {
        let seq = sample();
        assert_eq!(seq.index_of(&id(1)), Some(2));
        assert_eq!(seq.find(&id(2)).unwrap().value, Some('b'));
        assert!(seq.contains(&id(1)));
        assert!(!seq.contains(&id(9)));
        assert_eq!(seq.find(&id(9)), None);
    }

    #[test]
    fn test_visible_indexing_skips_tombstones() {
        let seq = sample();
        assert_eq!(seq.text(), "ab");
        assert_eq!(seq.visible_len(), 2);
        assert_eq!(seq.visible_index_of(&id(0)), Some(0));
        assert_eq!(seq.visible_index_of(&id(1)), None);
        assert_eq!(seq.visible_index_of(&id(2)), Some(1));
        assert_eq!(seq.nth_visible(1).unwrap().id, id(2));
        assert!(seq.nth_visible(2).is_none());
    }

    #[test]
    fn test_filtered_index_with_custom_filter() {
        let seq = sample();
        assert_eq!(seq.filtered_index_of(&id(2), |_| true), Some(3));
        assert_eq!(seq.filtered_index_of(&id(1), |atom| !atom.visible), Some(0));
    }

    #[test]
    fn test_anchors() {
        let seq = sample();

        let (prev, next) = seq.anchors_at(0).unwrap();
        assert_eq!(prev.id, Identifier::start());
        assert_eq!(next.id, id(0));

        let (prev, next) = seq.anchors_at(1).unwrap();
        assert_eq!(prev.id, id(0));
        assert_eq!(next.id, id(2));

        let (prev, next) = seq.anchors_at(2).unwrap();
        assert_eq!(prev.id, id(2));
        assert_eq!(next.id, Identifier::end());

        assert!(seq.anchors_at(3).is_none());
    }

    #[test]
    fn test_slice() {
        let seq = sample();
        let between: Vec<_> = seq.slice(0, 4).iter().map(|atom| atom.id.clone()).collect();
        assert_eq!(between, vec![id(0), id(1), id(2)]);
        assert!(seq.slice(1, 2).is_empty());
        assert!(seq.slice(3, 1).is_empty());
        assert!(seq.slice(3, 99).is_empty());
    }
}
