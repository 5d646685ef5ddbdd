use tracing::debug;

use crate::lexicon::Lexicon;
use crate::normalizer::{is_punctuation_only, strip_token};
use crate::schema::{EntityType, TaggedSpan};

/// A maximal run of non-whitespace characters, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    start: usize,
    end: usize,
}

/// Two-pass tagger: phrase patterns claim whole tokens first, then every
/// unclaimed token is typed through the keyword table.
pub struct EntityTagger<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> EntityTagger<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tag `text` into non-overlapping spans ordered by start offset.
    pub fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut claimed = vec![false; tokens.len()];
        let mut spans = self.phrase_pass(text, &tokens, &mut claimed);
        let phrase_count = spans.len();

        for (idx, token) in tokens.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            if let Some(span) = self.tag_word(text, *token) {
                spans.push(span);
            }
        }

        spans.sort_by_key(|span| span.start);

        debug!(
            tokens = tokens.len(),
            phrase_spans = phrase_count,
            spans = spans.len(),
            "Tagged text"
        );

        spans
    }

    fn phrase_pass(&self, text: &str, tokens: &[Token], claimed: &mut [bool]) -> Vec<TaggedSpan> {
        let mut spans = Vec::new();

        for pattern in self.lexicon.phrase_patterns() {
            for found in pattern.regex().find_iter(text) {
                let Some((first, last)) = token_range(text, tokens, found.start(), found.end()) else {
                    continue;
                };

                if claimed[first..=last].iter().any(|&c| c) {
                    continue;
                }
                claimed[first..=last].iter_mut().for_each(|c| *c = true);

                spans.push(TaggedSpan::new(
                    text,
                    tokens[first].start,
                    tokens[last].end,
                    pattern.entity_type(),
                ));
            }
        }

        spans
    }

    fn tag_word(&self, text: &str, token: Token) -> Option<TaggedSpan> {
        let surface = &text[token.start..token.end];
        if is_punctuation_only(surface) {
            return None;
        }

        let canonical = self.lexicon.canonicalize(strip_token(surface));
        let entity_type = self
            .lexicon
            .type_of(&canonical)
            .unwrap_or(EntityType::Other);

        Some(TaggedSpan::new(text, token.start, token.end, entity_type))
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), current) {
            (true, Some(start)) => {
                tokens.push(Token { start, end: idx });
                current = None;
            }
            (false, None) => current = Some(idx),
            _ => {}
        }
    }

    if let Some(start) = current {
        tokens.push(Token {
            start,
            end: text.len(),
        });
    }

    tokens
}

/// Indices of the first and last token touched by the match `start..end`,
/// ignoring whitespace at its edges. `None` for a match with no content.
fn token_range(text: &str, tokens: &[Token], start: usize, end: usize) -> Option<(usize, usize)> {
    let matched = &text[start..end];
    let trimmed = matched.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lead = matched.len() - matched.trim_start().len();
    let start = start + lead;
    let end = start + trimmed.len();

    // Tokens are sorted and disjoint, so the first token ending after `start`
    // contains it, and the last token starting before `end` contains `end - 1`.
    let first = tokens.partition_point(|t| t.end <= start);
    let last = tokens.partition_point(|t| t.start < end).checked_sub(1)?;

    (first <= last && last < tokens.len()).then_some((first, last))
}
