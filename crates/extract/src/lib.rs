pub mod lexicon;
pub mod normalizer;
pub mod schema;
pub mod structure;
pub mod tagger;

pub use lexicon::{Lexicon, LexiconError, PhrasePattern};
pub use schema::{Analysis, EntityType, StructureItem, StructureKind, TaggedSpan};
pub use structure::{BuilderConfig, OtherSpanPolicy, StructureBuilder};
pub use tagger::EntityTagger;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("Please provide text to analyze")]
    EmptyInput,
}

/// Text-to-process pipeline: tagging followed by structure building.
pub struct Extractor<'a> {
    lexicon: &'a Lexicon,
    builder: StructureBuilder,
}

impl Default for Extractor<'static> {
    fn default() -> Self {
        Self::new(Lexicon::builtin(), BuilderConfig::default())
    }
}

impl<'a> Extractor<'a> {
    pub fn new(lexicon: &'a Lexicon, config: BuilderConfig) -> Self {
        Self {
            lexicon,
            builder: StructureBuilder::new(config),
        }
    }

    pub fn with_config(config: BuilderConfig) -> Extractor<'static> {
        Extractor::new(Lexicon::builtin(), config)
    }

    /// Tag `text` and reduce it to a process structure.
    ///
    /// Fails only when `text` is empty after trimming.
    pub fn analyze(&self, text: &str) -> Result<Analysis, AnalyzeError> {
        if text.trim().is_empty() {
            debug!("Rejected empty analysis input");
            return Err(AnalyzeError::EmptyInput);
        }

        let spans = EntityTagger::new(self.lexicon).tag(text);
        let structure = self.builder.build(&spans);

        info!(
            chars = text.chars().count(),
            spans = spans.len(),
            items = structure.len(),
            "Analyzed process text"
        );

        Ok(Analysis::new(spans, structure))
    }
}

/// Analyze with the built-in lexicon and default builder settings.
pub fn analyze(text: &str) -> Result<Analysis, AnalyzeError> {
    Extractor::default().analyze(text)
}
