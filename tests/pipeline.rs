//! End-to-end tests for the site-build pipeline: manifest + document JSON
//! in, content-hash-named index file out.

use std::fs;
use std::path::Path;

use ferret::build::run_build;
use ferret::{decode, search, Tokenizer};

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn seed_corpus(dir: &Path) {
    write(
        &dir.join("manifest.json"),
        r#"{"version": 1, "documents": ["base.json", "constants.json"]}"#,
    );
    write(
        &dir.join("base.json"),
        r#"{
            "id": 0,
            "title": "Base Functions",
            "sourceRef": "05_base.md",
            "text": "label mapping helpers"
        }"#,
    );
    write(
        &dir.join("constants.json"),
        r#"{
            "id": 1,
            "title": "Constants",
            "sourceRef": "00_constants.md",
            "text": "country season split",
            "objects": [
                {"qualifiedName": "bigearthnet_common.constants.Country", "typeCode": "class"}
            ]
        }"#,
    );
}

#[test]
fn build_writes_a_loadable_index_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    seed_corpus(input.path());

    let written = run_build(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    )
    .unwrap();

    let name = written.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("searchindex-") && name.ends_with(".json"));

    let payload = fs::read_to_string(&written).unwrap();
    let index = decode(&payload).unwrap();
    assert_eq!(index.doc_count(), 2);
    assert_eq!(index.objects.len(), 1);

    let results = search(&index, &Tokenizer::default(), "country", None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id.get(), 1);
    assert_eq!(results[0].matched_objects.len(), 1);
}

#[test]
fn rebuilding_the_same_corpus_reuses_the_content_hash() {
    let input = tempfile::tempdir().unwrap();
    let first_out = tempfile::tempdir().unwrap();
    let second_out = tempfile::tempdir().unwrap();
    seed_corpus(input.path());

    let first = run_build(
        input.path().to_str().unwrap(),
        first_out.path().to_str().unwrap(),
    )
    .unwrap();
    let second = run_build(
        input.path().to_str().unwrap(),
        second_out.path().to_str().unwrap(),
    )
    .unwrap();

    assert_eq!(first.file_name(), second.file_name());
    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}

#[test]
fn custom_object_types_flow_from_the_manifest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("manifest.json"),
        r#"{
            "version": 1,
            "documents": ["api.json"],
            "objectTypes": {
                "class": {"displayName": "Python class", "searchPriority": 2}
            }
        }"#,
    );
    write(
        &input.path().join("api.json"),
        r#"{
            "id": 0,
            "title": "API",
            "sourceRef": "api.md",
            "text": "reference",
            "objects": [{"qualifiedName": "pkg.Thing", "typeCode": "class"}]
        }"#,
    );

    let written = run_build(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    )
    .unwrap();
    let index = decode(&fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(
        index.object_types.get("class").unwrap().display_name,
        "Python class"
    );
}

#[test]
fn missing_document_file_fails_the_build() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("manifest.json"),
        r#"{"version": 1, "documents": ["ghost.json"]}"#,
    );

    let err = run_build(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    )
    .unwrap_err();
    assert!(err.contains("ghost.json"));
}

#[test]
fn unsupported_manifest_version_fails_the_build() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("manifest.json"),
        r#"{"version": 9, "documents": []}"#,
    );

    let err = run_build(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    )
    .unwrap_err();
    assert!(err.contains("manifest version"));
}

#[test]
fn duplicate_qualified_names_across_documents_fail_the_build() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("manifest.json"),
        r#"{"version": 1, "documents": ["a.json", "b.json"]}"#,
    );
    for (name, id) in [("a.json", 0), ("b.json", 1)] {
        write(
            &input.path().join(name),
            &format!(
                r#"{{
                    "id": {id},
                    "title": "Page {id}",
                    "sourceRef": "{id}.md",
                    "text": "text",
                    "objects": [{{"qualifiedName": "pkg.dup", "typeCode": "function"}}]
                }}"#
            ),
        );
    }

    let err = run_build(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    )
    .unwrap_err();
    assert!(err.contains("pkg.dup"));
}
