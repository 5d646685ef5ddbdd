use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalizer::{clean_phrase, normalize_token};
use crate::schema::{StructureItem, StructureKind, TaggedSpan};

/// Markers that always open the alternative branch of a condition.
const BRANCH_MARKERS: &[&str] = &["else", "otherwise"];

/// What an OTHER span does to a phrase that is being accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtherSpanPolicy {
    /// Close the phrase immediately.
    #[default]
    Flush,
    /// Append the span to the phrase unless the phrase already ends a clause.
    Absorb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    #[serde(default)]
    pub other_spans: OtherSpanPolicy,
}

/// Phrase being accumulated during one `build` call.
struct Phrase {
    kind: StructureKind,
    parts: Vec<String>,
}

impl Phrase {
    fn ends_clause(&self) -> bool {
        self.parts
            .last()
            .map(|p| p.trim_end().ends_with(['.', ',', ';', '!', '?']))
            .unwrap_or(false)
    }
}

pub struct StructureBuilder {
    config: BuilderConfig,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl StructureBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Reduce tagged spans to a coalesced sequence of structure items.
    pub fn build(&self, spans: &[TaggedSpan]) -> Vec<StructureItem> {
        let mut items = Vec::new();
        let mut current: Option<Phrase> = None;

        for span in spans {
            let normalized = normalize_token(&span.text);
            if BRANCH_MARKERS.contains(&normalized.as_str()) {
                flush(&mut current, &mut items);
                items.push(StructureItem::new(normalized, StructureKind::Condition));
                continue;
            }

            match StructureKind::try_from(span.entity_type) {
                Ok(kind) => match current.as_mut() {
                    Some(phrase) if phrase.kind == kind => phrase.parts.push(span.text.clone()),
                    _ => {
                        flush(&mut current, &mut items);
                        current = Some(Phrase {
                            kind,
                            parts: vec![span.text.clone()],
                        });
                    }
                },
                Err(_) => self.on_other(span, &mut current, &mut items),
            }
        }

        flush(&mut current, &mut items);

        debug!(
            spans = spans.len(),
            items = items.len(),
            policy = ?self.config.other_spans,
            "Built process structure"
        );

        items
    }

    fn on_other(
        &self,
        span: &TaggedSpan,
        current: &mut Option<Phrase>,
        items: &mut Vec<StructureItem>,
    ) {
        match (self.config.other_spans, current.as_mut()) {
            (OtherSpanPolicy::Absorb, Some(phrase)) if !phrase.ends_clause() => {
                phrase.parts.push(span.text.clone());
            }
            _ => flush(current, items),
        }
    }
}

fn flush(current: &mut Option<Phrase>, items: &mut Vec<StructureItem>) {
    let Some(phrase) = current.take() else {
        return;
    };

    let text = clean_phrase(&phrase.parts.join(" "));
    if !text.is_empty() {
        items.push(StructureItem::new(text, phrase.kind));
    }
}
