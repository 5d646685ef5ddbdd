//! Static vocabulary used by the tagger.
//!
//! A [`Lexicon`] holds three read-only tables: canonical keywords and their
//! entity type, a word-form map from inflected surface forms to canonical
//! words, and an ordered list of phrase patterns. The built-in lexicon is
//! constructed once per process and shared; custom lexicons are validated on
//! construction so the lookups themselves can never fail.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::EntityType;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("keyword `{keyword}` is listed as both {first} and {second}")]
    ConflictingKeyword {
        keyword: String,
        first: EntityType,
        second: EntityType,
    },

    #[error("word form `{form}` maps to `{target}`, which is itself a mapped form")]
    WordFormCycle { form: String, target: String },

    #[error("invalid phrase pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled phrase pattern and the type it assigns to its matches.
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    regex: Regex,
    entity_type: EntityType,
}

impl PhrasePattern {
    pub fn new(pattern: &str, entity_type: EntityType) -> Result<Self, LexiconError> {
        let regex = Regex::new(pattern).map_err(|source| LexiconError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { regex, entity_type })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: HashMap<String, EntityType>,
    word_forms: HashMap<String, String>,
    patterns: Vec<PhrasePattern>,
}

static BUILTIN: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::from_builtin_tables().expect("built-in lexicon tables are consistent"));

impl Lexicon {
    /// Build a lexicon, rejecting tables that break the keyword or word-form invariants.
    pub fn new<K, F, S, U, T>(
        keywords: K,
        word_forms: F,
        patterns: Vec<PhrasePattern>,
    ) -> Result<Self, LexiconError>
    where
        K: IntoIterator<Item = (S, EntityType)>,
        F: IntoIterator<Item = (U, T)>,
        S: AsRef<str>,
        U: AsRef<str>,
        T: AsRef<str>,
    {
        let mut keyword_map: HashMap<String, EntityType> = HashMap::new();
        for (keyword, entity_type) in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if let Some(&existing) = keyword_map.get(&keyword) {
                if existing != entity_type {
                    return Err(LexiconError::ConflictingKeyword {
                        keyword,
                        first: existing,
                        second: entity_type,
                    });
                }
                continue;
            }
            keyword_map.insert(keyword, entity_type);
        }

        let form_map: HashMap<String, String> = word_forms
            .into_iter()
            .map(|(form, base)| (form.as_ref().to_lowercase(), base.as_ref().to_lowercase()))
            .collect();

        // A target that is also a key would make canonicalization non-idempotent.
        for (form, target) in &form_map {
            if form_map.contains_key(target) {
                return Err(LexiconError::WordFormCycle {
                    form: form.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(Self {
            keywords: keyword_map,
            word_forms: form_map,
            patterns,
        })
    }

    /// The shared built-in English process vocabulary.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    fn from_builtin_tables() -> Result<Self, LexiconError> {
        let keywords = AGENT_KEYWORDS
            .iter()
            .map(|&k| (k, EntityType::Agent))
            .chain(TASK_KEYWORDS.iter().map(|&k| (k, EntityType::Task)))
            .chain(CONDITION_KEYWORDS.iter().map(|&k| (k, EntityType::Condition)));

        let mut lexicon = Self::new(keywords, WORD_FORMS.iter().copied(), Vec::new())?;

        let agents = alternation(&lexicon.surface_forms(EntityType::Agent));
        let tasks = alternation(&lexicon.surface_forms(EntityType::Task));

        lexicon.patterns = vec![
            PhrasePattern::new(QUALIFIED_ACTOR, EntityType::Agent)?,
            PhrasePattern::new(&format!(r"(?i)\b(?:{agents})\b"), EntityType::Agent)?,
            PhrasePattern::new(REQUEST_ACTION, EntityType::Task)?,
            PhrasePattern::new(
                &format!(r"(?i)\b(?:{tasks})\s+(?:the|a|an)\s+[a-z]+(?:\s+(?:{OBJECT_HEADS}))?\b"),
                EntityType::Task,
            )?,
            PhrasePattern::new(SUBJECT_CONDITION, EntityType::Condition)?,
            PhrasePattern::new(CONDITION_MARKERS, EntityType::Condition)?,
        ];

        Ok(lexicon)
    }

    pub fn type_of(&self, canonical_word: &str) -> Option<EntityType> {
        self.keywords.get(canonical_word).copied()
    }

    /// Map an inflected form to its base form; unknown words come back lowercased.
    pub fn canonicalize(&self, surface_word: &str) -> String {
        let lower = surface_word.to_lowercase();
        match self.word_forms.get(&lower) {
            Some(base) => base.clone(),
            None => lower,
        }
    }

    pub fn phrase_patterns(&self) -> &[PhrasePattern] {
        &self.patterns
    }

    /// Every keyword of `entity_type` plus every word form that maps onto one.
    pub fn surface_forms(&self, entity_type: EntityType) -> Vec<&str> {
        let mut forms: Vec<&str> = self
            .keywords
            .iter()
            .filter(|&(_, &t)| t == entity_type)
            .map(|(k, _)| k.as_str())
            .chain(
                self.word_forms
                    .iter()
                    .filter(|&(_, base)| self.type_of(base) == Some(entity_type))
                    .map(|(form, _)| form.as_str()),
            )
            .collect();
        forms.sort_unstable();
        forms
    }
}

/// Longest alternatives first so a prefix never shadows a longer word.
fn alternation(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

const AGENT_KEYWORDS: &[&str] = &[
    "customer", "client", "user", "member", "applicant",
    "agent", "representative", "assistant",
    "accounting",
    "system", "software", "platform",
    "manager", "supervisor", "director",
    "employee", "staff", "worker", "team",
    "admin", "administrator",
    "department", "division", "unit",
    "officer", "clerk",
];

const TASK_KEYWORDS: &[&str] = &[
    "submit", "send", "provide", "give",
    "review", "check", "examine", "verify",
    "approve", "authorize", "confirm", "validate",
    "process", "handle", "manage", "execute",
    "receive", "get", "obtain", "collect",
    "inform", "notify", "tell", "update",
    "create", "generate", "produce",
    "modify", "change", "edit",
    "delete", "remove", "cancel",
    "pay", "charge", "invoice",
    "refund", "return", "reimburse",
    "reject", "accept", "assign", "forward", "escalate", "contact",
    "sign", "ship", "deliver", "prepare", "register", "record", "archive",
    "schedule", "complete",
];

const CONDITION_KEYWORDS: &[&str] = &[
    "if", "when", "whenever", "unless", "except", "assuming",
    "else", "otherwise",
];

/// Actor nouns preceded by the unit they belong to, e.g. "support agent".
const QUALIFIED_ACTOR: &str = r"(?i)\b(?:customer\s+service|support|sales|finance|billing|shipping|warehouse|legal|hr|procurement|purchasing|credit|quality|accounts\s+payable|accounts\s+receivable)\s+(?:agents?|representatives?|assistants?|departments?|teams?|divisions?|units?|managers?|officers?|clerks?|staff)\b";

/// Filing a request-like document: "submits a refund request".
const REQUEST_ACTION: &str = r"(?i)\b(?:submit(?:s|ted|ting)?|send(?:s|ing)?|sent|provide[sd]?|providing|file[sd]?|filing|raise[sd]?|raising)\s+(?:a|an|the)\s+(?:[a-z]+\s+){0,2}?(?:request|claim|application|form|ticket|order|report|invoice)s?\b";

/// Head nouns allowed as the second word of an action's object.
const OBJECT_HEADS: &str = "email|emails|message|letter|form|request|report|payment|order|invoice|receipt|notification|document|documents|number|details|status|record|ticket|claim";

/// "if the amount is valid", "when the order has not shipped".
const SUBJECT_CONDITION: &str = r"(?i)\b(?:if|when|whenever|unless|once)\s+the\s+[a-z]+(?:\s+(?:is|are|was|were|has|have|does|do)(?:\s+not)?(?:\s+[a-z]+)?)?\b";

const CONDITION_MARKERS: &str = r"(?i)\b(?:in\s+case(?:\s+of)?|provided\s+that|given\s+that|assuming\s+that|as\s+long\s+as)\b";

const WORD_FORMS: &[(&str, &str)] = &[
    ("submits", "submit"), ("submitted", "submit"), ("submitting", "submit"),
    ("sends", "send"), ("sent", "send"), ("sending", "send"),
    ("provides", "provide"), ("provided", "provide"), ("providing", "provide"),
    ("gives", "give"), ("gave", "give"), ("given", "give"), ("giving", "give"),
    ("reviews", "review"), ("reviewed", "review"), ("reviewing", "review"),
    ("checks", "check"), ("checked", "check"), ("checking", "check"),
    ("examines", "examine"), ("examined", "examine"), ("examining", "examine"),
    ("verifies", "verify"), ("verified", "verify"), ("verifying", "verify"),
    ("approves", "approve"), ("approved", "approve"), ("approving", "approve"),
    ("authorizes", "authorize"), ("authorized", "authorize"), ("authorizing", "authorize"),
    ("confirms", "confirm"), ("confirmed", "confirm"), ("confirming", "confirm"),
    ("validates", "validate"), ("validated", "validate"), ("validating", "validate"),
    ("processes", "process"), ("processed", "process"), ("processing", "process"),
    ("handles", "handle"), ("handled", "handle"), ("handling", "handle"),
    ("manages", "manage"), ("managed", "manage"), ("managing", "manage"),
    ("executes", "execute"), ("executed", "execute"), ("executing", "execute"),
    ("receives", "receive"), ("received", "receive"), ("receiving", "receive"),
    ("gets", "get"), ("got", "get"), ("getting", "get"),
    ("obtains", "obtain"), ("obtained", "obtain"), ("obtaining", "obtain"),
    ("collects", "collect"), ("collected", "collect"), ("collecting", "collect"),
    ("informs", "inform"), ("informed", "inform"), ("informing", "inform"),
    ("notifies", "notify"), ("notified", "notify"), ("notifying", "notify"),
    ("tells", "tell"), ("told", "tell"), ("telling", "tell"),
    ("updates", "update"), ("updated", "update"), ("updating", "update"),
    ("creates", "create"), ("created", "create"), ("creating", "create"),
    ("generates", "generate"), ("generated", "generate"), ("generating", "generate"),
    ("produces", "produce"), ("produced", "produce"), ("producing", "produce"),
    ("modifies", "modify"), ("modified", "modify"), ("modifying", "modify"),
    ("changes", "change"), ("changed", "change"), ("changing", "change"),
    ("edits", "edit"), ("edited", "edit"), ("editing", "edit"),
    ("deletes", "delete"), ("deleted", "delete"), ("deleting", "delete"),
    ("removes", "remove"), ("removed", "remove"), ("removing", "remove"),
    ("cancels", "cancel"), ("cancelled", "cancel"), ("canceled", "cancel"), ("cancelling", "cancel"), ("canceling", "cancel"),
    ("pays", "pay"), ("paid", "pay"), ("paying", "pay"),
    ("charges", "charge"), ("charged", "charge"), ("charging", "charge"),
    ("invoices", "invoice"), ("invoiced", "invoice"), ("invoicing", "invoice"),
    ("refunds", "refund"), ("refunded", "refund"), ("refunding", "refund"),
    ("returns", "return"), ("returned", "return"), ("returning", "return"),
    ("reimburses", "reimburse"), ("reimbursed", "reimburse"), ("reimbursing", "reimburse"),
    ("rejects", "reject"), ("rejected", "reject"), ("rejecting", "reject"),
    ("accepts", "accept"), ("accepted", "accept"), ("accepting", "accept"),
    ("assigns", "assign"), ("assigned", "assign"), ("assigning", "assign"),
    ("forwards", "forward"), ("forwarded", "forward"), ("forwarding", "forward"),
    ("escalates", "escalate"), ("escalated", "escalate"), ("escalating", "escalate"),
    ("contacts", "contact"), ("contacted", "contact"), ("contacting", "contact"),
    ("signs", "sign"), ("signed", "sign"), ("signing", "sign"),
    ("ships", "ship"), ("shipped", "ship"), ("shipping", "ship"),
    ("delivers", "deliver"), ("delivered", "deliver"), ("delivering", "deliver"),
    ("prepares", "prepare"), ("prepared", "prepare"), ("preparing", "prepare"),
    ("registers", "register"), ("registered", "register"), ("registering", "register"),
    ("records", "record"), ("recorded", "record"), ("recording", "record"),
    ("archives", "archive"), ("archived", "archive"), ("archiving", "archive"),
    ("schedules", "schedule"), ("scheduled", "schedule"), ("scheduling", "schedule"),
    ("completes", "complete"), ("completed", "complete"), ("completing", "complete"),
    ("customers", "customer"),
    ("clients", "client"),
    ("users", "user"),
    ("members", "member"),
    ("applicants", "applicant"),
    ("agents", "agent"),
    ("representatives", "representative"),
    ("assistants", "assistant"),
    ("systems", "system"),
    ("platforms", "platform"),
    ("managers", "manager"),
    ("supervisors", "supervisor"),
    ("directors", "director"),
    ("employees", "employee"),
    ("workers", "worker"),
    ("teams", "team"),
    ("admins", "admin"),
    ("administrators", "administrator"),
    ("departments", "department"),
    ("divisions", "division"),
    ("units", "unit"),
    ("officers", "officer"),
    ("clerks", "clerk"),
];
