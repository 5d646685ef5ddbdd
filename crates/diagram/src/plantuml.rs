use crate::flow::FlowEvent;

/// Render flow events as a PlantUML activity diagram with swimlanes.
pub fn render_plantuml(events: &[FlowEvent]) -> String {
    let mut lines = vec!["@startuml".to_string()];

    for event in events {
        lines.push(match event {
            FlowEvent::Lane(name) => format!("|{}|", sanitize(name, &['|'])),
            FlowEvent::Action(label) => format!(":{};", sanitize(label, &[';'])),
            FlowEvent::BranchOpen(label) => {
                format!("if ({}?) then (yes)", sanitize(label, &['(', ')']))
            }
            FlowEvent::BranchElse => "else (no)".to_string(),
            FlowEvent::BranchClose => "endif".to_string(),
        });
    }

    lines.push("stop".to_string());
    lines.push("@enduml".to_string());
    lines.join("\n")
}

/// Drop characters that would terminate the surrounding PlantUML construct.
fn sanitize(text: &str, reserved: &[char]) -> String {
    text.chars()
        .filter(|c| !reserved.contains(c))
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
