use once_cell::sync::Lazy;
use regex::Regex;

/// Characters removed from the end of a token before lexicon lookup.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?', '\'', '"', ':'];

/// Opening quotes and brackets removed from the front of a token.
const LEADING_PUNCTUATION: &[char] = &['"', '\'', '(', '['];

static PHRASE_EDGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\p{P}]+|[\s\p{P}]+$").unwrap());

static PUNCTUATION_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}+$").unwrap());

/// Strip the punctuation that surrounds a word token, keeping the inside intact.
pub fn strip_token(token: &str) -> &str {
    token
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim_start_matches(LEADING_PUNCTUATION)
}

/// Lookup form of a surface token: stripped and lowercased.
pub fn normalize_token(token: &str) -> String {
    strip_token(token.trim()).to_lowercase()
}

/// True when every char is Unicode punctuation. Symbols such as `€` or `→` are not.
pub fn is_punctuation_only(token: &str) -> bool {
    PUNCTUATION_ONLY.is_match(token)
}

/// Trim leading/trailing punctuation and whitespace from a phrase.
pub fn clean_phrase(phrase: &str) -> String {
    PHRASE_EDGES.replace_all(phrase, "").to_string()
}
