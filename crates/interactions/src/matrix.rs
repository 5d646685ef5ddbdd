use serde::Serialize;
use std::collections::HashMap;

use crate::transitions::TransitionTable;

/// Index-based flow link, suitable for a Sankey-style view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
}

/// Square actor-to-actor matrix; `counts[i][j]` is hand-overs from `agents[i]` to `agents[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionMatrix {
    pub agents: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl InteractionMatrix {
    pub fn from_table(table: &TransitionTable) -> Self {
        let mut agents: Vec<String> = table
            .iter()
            .flat_map(|(t, _)| [t.from.clone(), t.to.clone()])
            .collect();
        agents.sort();
        agents.dedup();

        let agent_to_idx: HashMap<String, usize> = agents
            .iter()
            .enumerate()
            .map(|(idx, agent)| (agent.clone(), idx))
            .collect();

        let mut counts = vec![vec![0; agents.len()]; agents.len()];
        for (transition, count) in table.iter() {
            let from = agent_to_idx[&transition.from];
            let to = agent_to_idx[&transition.to];
            counts[from][to] = count;
        }

        Self { agents, counts }
    }

    /// Non-zero cells as links, row-major.
    pub fn links(&self) -> Vec<TransitionLink> {
        let mut links = Vec::new();
        for (source, row) in self.counts.iter().enumerate() {
            for (target, &value) in row.iter().enumerate() {
                if value > 0 {
                    links.push(TransitionLink {
                        source,
                        target,
                        value,
                    });
                }
            }
        }
        links
    }
}
