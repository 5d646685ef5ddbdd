use extract::{
    AnalyzeError, EntityTagger, EntityType, Lexicon, StructureBuilder, StructureItem,
    StructureKind, TaggedSpan, analyze,
};
use proptest::prelude::*;

const REFUND_PROCESS: &str = "The customer submits a refund request, the support agent reviews the request
and if the request is valid, the finance department approves the refund, the system processes the payment, the customer receives a confirmation email
else the support agent informs the customer.";

fn has_span(entities: &[(String, EntityType)], needle: &str, entity_type: EntityType) -> bool {
    entities.iter().any(|(text, t)| {
        *t == entity_type && text.split_whitespace().any(|w| w.trim_end_matches(['.', ',']) == needle)
    })
}

fn kinds(structure: &[StructureItem]) -> Vec<StructureKind> {
    structure.iter().map(|item| item.kind).collect()
}

#[test]
fn test_short_approval_process() {
    let text = "The customer submits a request. The agent reviews it. If valid, the system approves it else the agent rejects it.";
    let analysis = analyze(text).unwrap();

    for (word, entity_type) in [
        ("customer", EntityType::Agent),
        ("submits", EntityType::Task),
        ("agent", EntityType::Agent),
        ("reviews", EntityType::Task),
        ("If", EntityType::Condition),
        ("system", EntityType::Agent),
        ("approves", EntityType::Task),
        ("else", EntityType::Condition),
        ("rejects", EntityType::Task),
    ] {
        assert!(
            has_span(&analysis.entities, word, entity_type),
            "missing ({word}, {entity_type}) in {:?}",
            analysis.entities
        );
    }

    let expected = vec![
        StructureItem::new("customer", StructureKind::Agent),
        StructureItem::new("submits a request", StructureKind::Task),
        StructureItem::new("agent", StructureKind::Agent),
        StructureItem::new("reviews", StructureKind::Task),
        StructureItem::new("If", StructureKind::Condition),
        StructureItem::new("system", StructureKind::Agent),
        StructureItem::new("approves", StructureKind::Task),
        StructureItem::new("else", StructureKind::Condition),
        StructureItem::new("agent", StructureKind::Agent),
        StructureItem::new("rejects", StructureKind::Task),
    ];
    assert_eq!(analysis.structure, expected);

    let else_items = analysis
        .structure
        .iter()
        .filter(|item| item.text == "else")
        .count();
    assert_eq!(else_items, 1);
}

#[test]
fn test_refund_process() {
    let analysis = analyze(REFUND_PROCESS).unwrap();
    let texts: Vec<&str> = analysis.structure.iter().map(|i| i.text.as_str()).collect();

    assert_eq!(
        texts,
        vec![
            "customer",
            "submits a refund request",
            "support agent",
            "reviews the request",
            "if the request is valid",
            "finance department",
            "approves the refund",
            "system",
            "processes the payment",
            "customer",
            "receives a confirmation email",
            "else",
            "support agent",
            "informs",
            "customer",
        ]
    );
    assert_eq!(
        &kinds(&analysis.structure)[..5],
        &[
            StructureKind::Agent,
            StructureKind::Task,
            StructureKind::Agent,
            StructureKind::Task,
            StructureKind::Condition,
        ]
    );
}

#[test]
fn test_empty_input_fails() {
    assert_eq!(analyze("").unwrap_err(), AnalyzeError::EmptyInput);
}

#[test]
fn test_unknown_vocabulary() {
    let analysis = analyze("Xyzzy plugh foobar.").unwrap();

    assert_eq!(analysis.entities.len(), 3);
    assert!(analysis.entities.iter().all(|(_, t)| *t == EntityType::Other));
    assert!(analysis.structure.is_empty());
}

#[test]
fn test_leading_condition_phrase() {
    let analysis = analyze("if the amount is valid").unwrap();

    assert_eq!(
        analysis.entities,
        vec![("if the amount is valid".to_string(), EntityType::Condition)]
    );
    assert_eq!(
        analysis.structure,
        vec![StructureItem::new("if the amount is valid", StructureKind::Condition)]
    );
}

#[test]
fn test_unicode_dash_is_trimmed_from_phrase() {
    let analysis = analyze("The customer submits a refund request— then waits").unwrap();

    assert_eq!(analysis.structure[1].text, "submits a refund request");
    assert_eq!(analysis.structure[1].kind, StructureKind::Task);
}

#[test]
fn test_otherwise_is_standalone_after_condition_phrase() {
    let analysis = analyze("When the order has shipped the clerk archives it, otherwise the clerk cancels it").unwrap();
    let otherwise: Vec<&StructureItem> = analysis
        .structure
        .iter()
        .filter(|item| item.text == "otherwise")
        .collect();

    assert_eq!(otherwise.len(), 1);
    assert_eq!(otherwise[0].kind, StructureKind::Condition);
    assert_eq!(analysis.structure[0].text, "When the order has shipped");
}

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "customer", "Customers", "agent", "support", "finance", "department", "system",
            "submits", "approves", "the", "a", "request", "refund", "if", "If", "when", "else",
            "otherwise", "provided", "that", "is", "valid", "email", "in", "case", "€", "→", "20%",
            "😀",
        ])
        .prop_map(str::to_string),
        "[a-zA-Z]{1,8}",
    ]
    .prop_flat_map(|w| {
        prop::sample::select(vec!["", ".", ",", ";", "!"]).prop_map(move |p| format!("{w}{p}"))
    })
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (word(), prop::sample::select(vec![" ", "  ", "\n", "\t "])),
        0..24,
    )
    .prop_map(|parts| parts.into_iter().map(|(w, sep)| format!("{w}{sep}")).collect())
}

fn structure_span(text: &str, entity_type: EntityType) -> (String, EntityType) {
    (text.to_string(), entity_type)
}

fn lay_out(parts: &[(String, EntityType)]) -> Vec<TaggedSpan> {
    let source = parts.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>().join(" ");
    let mut offset = 0;
    parts
        .iter()
        .map(|(text, entity_type)| {
            let span = TaggedSpan::new(&source, offset, offset + text.len(), *entity_type);
            offset += text.len() + 1;
            span
        })
        .collect()
}

fn typed_span() -> impl Strategy<Value = (String, EntityType)> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|w| structure_span(&w, EntityType::Agent)),
        "[a-z]{1,6}".prop_map(|w| structure_span(&w, EntityType::Task)),
        "[a-z]{1,6}".prop_map(|w| structure_span(&w, EntityType::Condition)),
        prop::sample::select(vec!["else", "otherwise", "Else,"])
            .prop_map(|w| structure_span(w, EntityType::Condition)),
    ]
}

proptest! {
    #[test]
    fn prop_spans_cover_every_non_whitespace_char_once(text in sentence()) {
        let spans = EntityTagger::new(Lexicon::builtin()).tag(&text);

        for (idx, ch) in text.char_indices() {
            if ch.is_whitespace() {
                continue;
            }
            let covering = spans.iter().filter(|s| s.start <= idx && idx < s.end).count();
            prop_assert_eq!(covering, 1, "byte {} of {:?}", idx, text);
        }
    }

    #[test]
    fn prop_spans_never_overlap(text in sentence()) {
        let spans = EntityTagger::new(Lexicon::builtin()).tag(&text);

        for pair in spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
            prop_assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn prop_tagging_is_deterministic(text in sentence()) {
        let tagger = EntityTagger::new(Lexicon::builtin());
        prop_assert_eq!(tagger.tag(&text), tagger.tag(&text));
    }

    #[test]
    fn prop_canonicalize_is_idempotent(w in "[a-zA-Z]{0,12}") {
        let lexicon = Lexicon::builtin();
        let once = lexicon.canonicalize(&w);
        prop_assert_eq!(lexicon.canonicalize(&once), once);
    }

    #[test]
    fn prop_structure_is_coalesced(parts in prop::collection::vec(typed_span(), 0..20)) {
        let items = StructureBuilder::default().build(&lay_out(&parts));
        let is_branch = |item: &StructureItem| item.text == "else" || item.text == "otherwise";

        for pair in items.windows(2) {
            if pair[0].kind == pair[1].kind {
                prop_assert!(is_branch(&pair[0]) || is_branch(&pair[1]), "{:?}", items);
            }
        }
    }

    #[test]
    fn prop_branch_markers_are_standalone(parts in prop::collection::vec(typed_span(), 0..20)) {
        let items = StructureBuilder::default().build(&lay_out(&parts));
        let markers = parts
            .iter()
            .filter(|(t, _)| matches!(t.to_lowercase().trim_end_matches(',') , "else" | "otherwise"))
            .count();
        let branch_items = items
            .iter()
            .filter(|item| item.kind == StructureKind::Condition && (item.text == "else" || item.text == "otherwise"))
            .count();

        prop_assert_eq!(markers, branch_items);
    }
}
