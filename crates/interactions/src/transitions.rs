use extract::{StructureItem, StructureKind};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A hand-over from one actor to the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
}

/// Frequency of each hand-over between consecutive distinct actors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    counts: BTreeMap<Transition, usize>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_structure(structure: &[StructureItem]) -> Self {
        let agents: Vec<String> = structure
            .iter()
            .filter(|item| item.kind == StructureKind::Agent)
            .map(StructureItem::key)
            .collect();

        let mut table = Self::new();
        for pair in agents.windows(2) {
            table.record(&pair[0], &pair[1]);
        }

        debug!(
            agents = agents.len(),
            transitions = table.len(),
            "Computed actor transitions"
        );

        table
    }

    /// Count one hand-over; self transitions are ignored.
    pub fn record(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        *self
            .counts
            .entry(Transition {
                from: from.to_string(),
                to: to.to_string(),
            })
            .or_insert(0) += 1;
    }

    pub fn count(&self, from: &str, to: &str) -> usize {
        self.counts
            .get(&Transition {
                from: from.to_string(),
                to: to.to_string(),
            })
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Transition, usize)> {
        self.counts.iter().map(|(t, &c)| (t, c))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
