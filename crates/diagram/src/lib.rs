pub mod flow;
pub mod plantuml;

pub use flow::{FlowEvent, flow_events};
pub use plantuml::render_plantuml;

use extract::StructureItem;

/// Structure items straight to PlantUML activity-diagram text.
pub fn structure_to_plantuml(structure: &[StructureItem]) -> String {
    render_plantuml(&flow_events(structure))
}
