use extract::{StructureItem, StructureKind};
use serde::Serialize;
use tracing::debug;

/// One step of a swimlane flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "label", rename_all = "snake_case")]
pub enum FlowEvent {
    Lane(String),
    Action(String),
    BranchOpen(String),
    BranchElse,
    BranchClose,
}

/// State of the innermost open branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Then,
    Else,
}

fn is_else_marker(text: &str) -> bool {
    text.eq_ignore_ascii_case("else") || text.eq_ignore_ascii_case("otherwise")
}

/// Walk the structure and emit lane switches, actions and branch markers.
///
/// Lanes switch only when the actor changes (case-insensitively). A new
/// condition closes the open branch first when that branch already has its
/// else part; every branch still open at the end is closed.
pub fn flow_events(structure: &[StructureItem]) -> Vec<FlowEvent> {
    let mut events = Vec::new();
    let mut lane: Option<String> = None;
    let mut branches: Vec<Branch> = Vec::new();

    for item in structure {
        match item.kind {
            StructureKind::Agent => {
                let key = item.key();
                if lane.as_deref() != Some(key.as_str()) {
                    events.push(FlowEvent::Lane(item.text.clone()));
                    lane = Some(key);
                }
            }
            StructureKind::Task => events.push(FlowEvent::Action(item.text.clone())),
            StructureKind::Condition if is_else_marker(&item.text) => match branches.last_mut() {
                Some(branch) if *branch == Branch::Then => {
                    *branch = Branch::Else;
                    events.push(FlowEvent::BranchElse);
                }
                _ => debug!(marker = %item.text, "Ignoring else marker without an open branch"),
            },
            StructureKind::Condition => {
                if branches.last() == Some(&Branch::Else) {
                    branches.pop();
                    events.push(FlowEvent::BranchClose);
                }
                branches.push(Branch::Then);
                events.push(FlowEvent::BranchOpen(item.text.clone()));
            }
        }
    }

    events.extend(branches.iter().map(|_| FlowEvent::BranchClose));
    events
}
