use extract::{AnalyzeError, EntityType, Extractor, StructureItem, TaggedSpan};
use interactions::TransitionLink;
use serde::Serialize;

/// Sample process served by `GET /example`.
pub const EXAMPLE_TEXT: &str = "The customer submits a refund request, the support agent reviews the request
and if the request is valid, the finance department approves the refund, the system processes the payment, the customer receives a confirmation email
else the support agent informs the customer.";

/// Everything derived from one input text.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub entities: Vec<(String, EntityType)>,
    pub spans: Vec<TaggedSpan>,
    pub structure: Vec<StructureItem>,
    pub plantuml: String,
    pub agents: Vec<String>,
    pub matrix: Vec<Vec<usize>>,
    pub links: Vec<TransitionLink>,
}

impl AnalysisReport {
    pub fn build(extractor: &Extractor<'_>, text: &str) -> Result<Self, AnalyzeError> {
        let analysis = extractor.analyze(text)?;

        let plantuml = diagram::structure_to_plantuml(&analysis.structure);
        let matrix = interactions::interaction_matrix(&analysis.structure);
        let links = matrix.links();

        Ok(Self {
            entities: analysis.entities,
            spans: analysis.spans,
            structure: analysis.structure,
            plantuml,
            agents: matrix.agents,
            matrix: matrix.counts,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_report() {
        let report = AnalysisReport::build(&Extractor::default(), EXAMPLE_TEXT).unwrap();

        assert!(report.plantuml.starts_with("@startuml\n|customer|\n"));
        assert!(report.plantuml.contains("else (no)"));
        assert!(report.plantuml.ends_with("endif\nstop\n@enduml"));
        assert_eq!(
            report.agents,
            vec!["customer", "finance department", "support agent", "system"]
        );
        assert_eq!(report.matrix.len(), 4);
        assert!(!report.links.is_empty());
    }

    #[test]
    fn test_empty_text_has_no_report() {
        let result = AnalysisReport::build(&Extractor::default(), "  ");
        assert_eq!(result.unwrap_err(), AnalyzeError::EmptyInput);
    }
}
