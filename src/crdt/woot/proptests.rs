//! Randomized convergence tests
//!
//! Replicas make random edits (indices may be out of range) while a
//! seeded harness delivers operations late, out of order and more than once.

use super::{outgoing, Effect, Identifier, Operation, WootText};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
enum Edit {
    Insert { position: usize, text: String },
    Delete { position: usize, length: usize },
    Replace { position: usize, length: usize, text: String },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..24, "[a-z0-9]{1,4}").prop_map(|(position, text)| Edit::Insert { position, text }),
        (0usize..24, 0usize..6).prop_map(|(position, length)| Edit::Delete { position, length }),
        (0usize..24, 0usize..6, "[A-Z]{0,3}").prop_map(|(position, length, text)| {
            Edit::Replace {
                position,
                length,
                text,
            }
        }),
    ]
}

struct Harness {
    nodes: Vec<WootText>,
    inboxes: Vec<Vec<Operation>>,
    tombstones: Vec<HashSet<Identifier>>,
    rng: StdRng,
}

impl Harness {
    fn new(replicas: usize, seed: u64) -> Self {
        // RUST_LOG=woot_core=debug shows pooling and releases
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            nodes: (0..replicas)
                .map(|i| WootText::new(format!("site{}", i)))
                .collect(),
            inboxes: vec![Vec::new(); replicas],
            tombstones: vec![HashSet::new(); replicas],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn apply(&mut self, node: usize, edit: &Edit) {
        let text = &mut self.nodes[node];
        let effects = match edit {
            Edit::Insert { position, text: s } => text.insert(*position, s),
            Edit::Delete { position, length } => text.delete(*position, *length),
            Edit::Replace {
                position,
                length,
                text: s,
            } => text.replace(*position, *length, s),
        }
        .unwrap();
        self.broadcast(node, &effects);
        self.check_tombstones(node);
    }

    fn broadcast(&mut self, from: usize, effects: &[Effect]) {
        for op in outgoing(effects) {
            for (i, inbox) in self.inboxes.iter_mut().enumerate() {
                if i != from {
                    inbox.push(op.clone());
                }
            }
        }
    }

    /// Deliver a random part of every inbox, sometimes twice
    fn deliver_some(&mut self) {
        for node in 0..self.nodes.len() {
            let mut inbox = std::mem::take(&mut self.inboxes[node]);
            inbox.shuffle(&mut self.rng);
            let count = self.rng.gen_range(0..=inbox.len());
            let delivered: Vec<Operation> = inbox.drain(..count).collect();
            for op in delivered {
                if self.rng.gen_bool(0.25) {
                    inbox.push(op.clone());
                }
                self.nodes[node].receive(op).unwrap();
            }
            self.inboxes[node] = inbox;
            self.check_tombstones(node);
        }
    }

    fn deliver_all(&mut self) {
        for node in 0..self.nodes.len() {
            let mut inbox = std::mem::take(&mut self.inboxes[node]);
            inbox.shuffle(&mut self.rng);
            for op in inbox {
                self.nodes[node].receive(op).unwrap();
            }
            self.check_tombstones(node);
        }
    }

    /// Once invisible, always invisible
    fn check_tombstones(&mut self, node: usize) {
        let atoms = self.nodes[node].atoms();
        for id in &self.tombstones[node] {
            let atom = atoms.iter().find(|atom| &atom.id == id).unwrap();
            assert!(!atom.visible, "tombstone {} came back", id);
        }
        self.tombstones[node].extend(
            atoms
                .iter()
                .filter(|atom| !atom.visible)
                .map(|atom| atom.id.clone()),
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_replicas_converge(
        replicas in 2usize..5,
        seed in any::<u64>(),
        edits in prop::collection::vec((0usize..4, edit_strategy()), 1..40),
    ) {
        let mut harness = Harness::new(replicas, seed);

        for (node, edit) in &edits {
            harness.apply(node % replicas, edit);
            harness.deliver_some();
        }
        harness.deliver_all();

        let expected = harness.nodes[0].value();
        for node in &harness.nodes {
            prop_assert_eq!(node.value(), expected.clone());
            prop_assert!(node.pending().is_empty());
        }
    }

    #[test]
    fn test_physical_order_is_independent_of_delivery(
        seed in any::<u64>(),
        edits in prop::collection::vec((0usize..3, edit_strategy()), 1..30),
    ) {
        let mut harness = Harness::new(3, seed);

        for (node, edit) in &edits {
            harness.apply(*node, edit);
            harness.deliver_some();
        }
        harness.deliver_all();

        let reference = harness.nodes[0].atoms().to_vec();
        for node in &harness.nodes[1..] {
            prop_assert_eq!(node.atoms(), reference.as_slice());
        }
    }

    #[test]
    fn test_snapshot_round_trip(
        seed in any::<u64>(),
        edits in prop::collection::vec((0usize..2, edit_strategy()), 1..20),
    ) {
        let mut harness = Harness::new(2, seed);
        for (node, edit) in &edits {
            harness.apply(*node, edit);
            harness.deliver_some();
        }

        let original = &harness.nodes[1];
        let restored = WootText::from_state("copy", &original.export_state().unwrap()).unwrap();

        prop_assert_eq!(restored.value(), original.value());
        prop_assert_eq!(restored.snapshot(), original.snapshot());
    }
}
