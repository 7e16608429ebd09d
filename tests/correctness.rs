//! End-to-end correctness tests over the public API: build, serialize,
//! load, query.

use ferret::{
    build_index, decode, encode, search, DocId, DocumentSource, MalformedIndex, ObjectCatalog,
    ObjectEntry, ObjectTypeCatalog, ScoredResult, SearchIndex, Tokenizer, WireError, BODY_WEIGHT,
    TITLE_WEIGHT,
};

fn source(id: u32, title: &str, body: &str) -> DocumentSource {
    DocumentSource {
        id,
        title: title.to_string(),
        source_ref: format!("{id}.md"),
        body: body.to_string(),
    }
}

fn entry(qualified_name: &str, type_code: &str, doc: u32) -> ObjectEntry {
    ObjectEntry {
        qualified_name: qualified_name.to_string(),
        type_code: type_code.to_string(),
        document_id: DocId(doc),
        anchor_id: qualified_name.to_string(),
        display_name: qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name)
            .to_string(),
    }
}

fn build(sources: &[DocumentSource], catalog: ObjectCatalog) -> SearchIndex {
    build_index(
        sources,
        &catalog,
        &ObjectTypeCatalog::standard(),
        &Tokenizer::default(),
    )
    .unwrap()
}

fn ids(results: &[ScoredResult]) -> Vec<u32> {
    results.iter().map(|r| r.document_id.get()).collect()
}

// ============================================================================
// RANKING
// ============================================================================

#[test]
fn title_matches_rank_above_object_matches_above_body_matches() {
    let sources = vec![
        source(0, "nothing here", "handler plumbing"),
        source(1, "handler reference", "other text"),
        source(2, "misc page", "words words"),
    ];
    let mut catalog = ObjectCatalog::new();
    catalog
        .add_object(entry("pkg.core.handler", "function", 2))
        .unwrap();
    let index = build(&sources, catalog);

    let results = search(&index, &Tokenizer::default(), "handler", None);
    assert_eq!(ids(&results), vec![1, 2, 0]); // title, object, body
    assert!(results[0].score > results[1].score);
    assert!(results[1].score > results[2].score);
}

#[test]
fn multi_term_scores_sum_across_terms() {
    let sources = vec![source(0, "Season Guide", "country notes")];
    let index = build(&sources, ObjectCatalog::new());

    let results = search(&index, &Tokenizer::default(), "season country", None);
    assert_eq!(results[0].score, TITLE_WEIGHT + BODY_WEIGHT);
}

#[test]
fn searching_an_empty_index_returns_nothing() {
    let index = build(&[], ObjectCatalog::new());
    assert!(search(&index, &Tokenizer::default(), "anything", None).is_empty());
}

#[test]
fn equal_scores_order_by_document_id_regardless_of_input_order() {
    let sources = vec![
        source(0, "", "shared term here"),
        source(1, "", "shared term there"),
        source(2, "", "shared term everywhere"),
    ];
    let index = build(&sources, ObjectCatalog::new());

    let results = search(&index, &Tokenizer::default(), "shared", None);
    assert_eq!(ids(&results), vec![0, 1, 2]);
}

// ============================================================================
// OBJECT RESULTS
// ============================================================================

#[test]
fn matched_objects_require_every_query_term_in_the_name() {
    let sources = vec![source(0, "API", "country season reference")];
    let mut catalog = ObjectCatalog::new();
    catalog.add_object(entry("pkg.constants.Country", "class", 0)).unwrap();
    let index = build(&sources, catalog);

    // "country" alone is covered by the object name; "country season" is not
    let single = search(&index, &Tokenizer::default(), "country", None);
    assert_eq!(single[0].matched_objects.len(), 1);

    let double = search(&index, &Tokenizer::default(), "country season", None);
    assert_eq!(ids(&double), vec![0]);
    assert!(double[0].matched_objects.is_empty());
}

#[test]
fn object_only_document_is_synthesized_into_results() {
    // Hand-crafted payload: the object exists but no term postings do, as
    // if the consumer stripped the terms section. The engine still has to
    // surface the owning document with an object-only score.
    let payload = r#"{
        "schemaVersion": "1",
        "documents": [{"title": "Constants", "sourceRef": "constants.md"}],
        "objectTypeCatalog": {"class": {"displayName": "class", "searchPriority": 1}},
        "objects": [{"qualifiedName": "pkg.constants.Country", "typeCode": "class",
                     "documentId": 0, "anchorId": "pkg.constants.Country",
                     "displayName": "Country"}],
        "terms": {}
    }"#;
    let index = decode(payload).unwrap();

    let results = search(&index, &Tokenizer::default(), "country", None);
    assert_eq!(ids(&results), vec![0]);
    assert_eq!(results[0].matched_objects.len(), 1);
    assert!(results[0].score > 0);
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[test]
fn round_trip_preserves_documents_objects_and_postings() {
    let sources = vec![
        source(0, "Base Functions", "label mapping helpers"),
        source(1, "Constants", "country season split"),
    ];
    let mut catalog = ObjectCatalog::new();
    catalog.add_object(entry("pkg.constants", "module", 1)).unwrap();
    catalog.add_object(entry("pkg.constants.Country", "class", 1)).unwrap();
    let index = build(&sources, catalog);

    let decoded = decode(&encode(&index)).unwrap();
    assert_eq!(index, decoded);
}

#[test]
fn foreign_schema_versions_are_refused() {
    let payload = r#"{
        "schemaVersion": "2027-experimental",
        "documents": [],
        "objectTypeCatalog": {},
        "objects": [],
        "terms": {}
    }"#;
    assert!(matches!(
        decode(payload),
        Err(WireError::SchemaMismatch { found }) if found == "2027-experimental"
    ));
}

#[test]
fn duplicate_qualified_names_are_refused_at_load_time() {
    let payload = r#"{
        "schemaVersion": "1",
        "documents": [{"title": "A", "sourceRef": "a.md"}],
        "objectTypeCatalog": {"class": {"displayName": "class", "searchPriority": 1}},
        "objects": [
            {"qualifiedName": "pkg.X", "typeCode": "class", "documentId": 0,
             "anchorId": "x", "displayName": "X"},
            {"qualifiedName": "pkg.X", "typeCode": "class", "documentId": 0,
             "anchorId": "x2", "displayName": "X"}
        ],
        "terms": {}
    }"#;
    assert!(matches!(
        decode(payload),
        Err(WireError::Malformed(MalformedIndex::DuplicateQualifiedName { .. }))
    ));
}

#[test]
fn object_referencing_a_missing_document_is_refused() {
    let payload = r#"{
        "schemaVersion": "1",
        "documents": [{"title": "A", "sourceRef": "a.md"}],
        "objectTypeCatalog": {"class": {"displayName": "class", "searchPriority": 1}},
        "objects": [{"qualifiedName": "pkg.X", "typeCode": "class", "documentId": 9,
                     "anchorId": "x", "displayName": "X"}],
        "terms": {}
    }"#;
    assert!(matches!(
        decode(payload),
        Err(WireError::Malformed(MalformedIndex::ObjectDocOutOfRange { doc_id: 9, .. }))
    ));
}
