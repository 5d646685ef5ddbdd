use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of labels the tagger assigns to spans of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Agent,
    Task,
    Condition,
    Other,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Agent => "AGENT",
            EntityType::Task => "TASK",
            EntityType::Condition => "CONDITION",
            EntityType::Other => "OTHER",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of entity types a structure item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StructureKind {
    Agent,
    Task,
    Condition,
}

impl TryFrom<EntityType> for StructureKind {
    type Error = EntityType;

    fn try_from(value: EntityType) -> Result<Self, Self::Error> {
        match value {
            EntityType::Agent => Ok(StructureKind::Agent),
            EntityType::Task => Ok(StructureKind::Task),
            EntityType::Condition => Ok(StructureKind::Condition),
            EntityType::Other => Err(value),
        }
    }
}

impl From<StructureKind> for EntityType {
    fn from(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Agent => EntityType::Agent,
            StructureKind::Task => EntityType::Task,
            StructureKind::Condition => EntityType::Condition,
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        EntityType::from(*self).fmt(f)
    }
}

/// A tagged slice of the analyzed text. `start..end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
}

impl TaggedSpan {
    pub fn new(source: &str, start: usize, end: usize, entity_type: EntityType) -> Self {
        Self {
            text: source[start..end].to_string(),
            entity_type,
            start,
            end,
        }
    }

    pub fn overlaps(&self, other: &TaggedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureItem {
    #[serde(rename = "word")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: StructureKind,
}

impl StructureItem {
    pub fn new(text: impl Into<String>, kind: StructureKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Identity used to compare actors: trimmed, fully lowercased text.
    pub fn key(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Result of a full text-to-structure run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// `(text, type)` view of `spans`, same order.
    pub entities: Vec<(String, EntityType)>,
    pub spans: Vec<TaggedSpan>,
    pub structure: Vec<StructureItem>,
}

impl Analysis {
    pub fn new(spans: Vec<TaggedSpan>, structure: Vec<StructureItem>) -> Self {
        let entities = spans
            .iter()
            .map(|span| (span.text.clone(), span.entity_type))
            .collect();

        Self {
            entities,
            spans,
            structure,
        }
    }
}
