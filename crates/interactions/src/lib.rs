pub mod matrix;
pub mod transitions;

pub use matrix::{InteractionMatrix, TransitionLink};
pub use transitions::{Transition, TransitionTable};

use extract::StructureItem;

/// Transition table and matrix for one structure in a single call.
pub fn interaction_matrix(structure: &[StructureItem]) -> InteractionMatrix {
    InteractionMatrix::from_table(&TransitionTable::from_structure(structure))
}
