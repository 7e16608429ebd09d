// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The wire format: a single versioned JSON payload.
//!
//! Terms are stored once as keys with postings as parallel
//! `documentIds`/`weights` arrays - for large term counts this is
//! substantially smaller than repeated per-posting objects. Term keys are
//! serialized in sorted order so identical inputs encode byte-identically.
//!
//! Decoding validates every cross-reference before returning a usable
//! index. Partial or corrupt input is rejected wholesale, never partially
//! loaded: a consumer that cannot load the index falls back to
//! no-search-available rather than serving half an index.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DocId, Document, ObjectEntry, ObjectTypeInfo, Posting, SearchIndex};

/// Opaque compatibility token. Bump on any change to the payload shape;
/// indexes built by a different toolchain version are rejected, not merged.
pub const SCHEMA_VERSION: &str = "1";

// =============================================================================
// PAYLOAD SHAPE
// =============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    schema_version: String,
    documents: Vec<WireDocument>,
    object_type_catalog: BTreeMap<String, ObjectTypeInfo>,
    objects: Vec<WireObject>,
    terms: BTreeMap<String, WirePostings>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDocument {
    title: String,
    source_ref: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireObject {
    qualified_name: String,
    type_code: String,
    document_id: u32,
    anchor_id: String,
    display_name: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePostings {
    document_ids: Vec<u32>,
    weights: Vec<u32>,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Load-time failures. All of them mean: refuse the index, require a fresh
/// build.
#[derive(Debug)]
pub enum WireError {
    /// Payload is not valid JSON.
    Parse(serde_json::Error),
    /// The payload was produced by a different toolchain version.
    SchemaMismatch { found: String },
    /// A structural invariant is violated.
    Malformed(MalformedIndex),
}

/// The specific structural invariant a payload violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedIndex {
    /// `documentIds` and `weights` differ in length.
    PostingArityMismatch {
        term: String,
        document_ids: usize,
        weights: usize,
    },
    /// A posting references a document outside the registry range.
    PostingDocOutOfRange {
        term: String,
        doc_id: u32,
        doc_count: usize,
    },
    /// A term lists the same document twice.
    DuplicatePostingDoc { term: String, doc_id: u32 },
    /// An object references a document outside the registry range.
    ObjectDocOutOfRange {
        qualified_name: String,
        doc_id: u32,
        doc_count: usize,
    },
    /// An object's type code is missing from the catalog.
    UnknownTypeCode {
        qualified_name: String,
        type_code: String,
    },
    /// Two objects share a qualified name.
    DuplicateQualifiedName { qualified_name: String },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Parse(e) => write!(f, "invalid payload: {}", e),
            WireError::SchemaMismatch { found } => {
                write!(
                    f,
                    "schema version mismatch: found '{}', expected '{}'",
                    found, SCHEMA_VERSION
                )
            }
            WireError::Malformed(m) => write!(f, "malformed index: {}", m),
        }
    }
}

impl fmt::Display for MalformedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedIndex::PostingArityMismatch {
                term,
                document_ids,
                weights,
            } => write!(
                f,
                "term '{}' has {} document ids but {} weights",
                term, document_ids, weights
            ),
            MalformedIndex::PostingDocOutOfRange {
                term,
                doc_id,
                doc_count,
            } => write!(
                f,
                "term '{}' references document {} but only {} documents exist",
                term, doc_id, doc_count
            ),
            MalformedIndex::DuplicatePostingDoc { term, doc_id } => {
                write!(f, "term '{}' lists document {} twice", term, doc_id)
            }
            MalformedIndex::ObjectDocOutOfRange {
                qualified_name,
                doc_id,
                doc_count,
            } => write!(
                f,
                "object '{}' references document {} but only {} documents exist",
                qualified_name, doc_id, doc_count
            ),
            MalformedIndex::UnknownTypeCode {
                qualified_name,
                type_code,
            } => write!(
                f,
                "object '{}' has unknown type code '{}'",
                qualified_name, type_code
            ),
            MalformedIndex::DuplicateQualifiedName { qualified_name } => {
                write!(f, "duplicate qualified name '{}'", qualified_name)
            }
        }
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WireError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(e: serde_json::Error) -> Self {
        WireError::Parse(e)
    }
}

impl From<MalformedIndex> for WireError {
    fn from(m: MalformedIndex) -> Self {
        WireError::Malformed(m)
    }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode an index into its transport form.
///
/// Deterministic: the same index always encodes to the same bytes.
pub fn encode(index: &SearchIndex) -> String {
    let payload = WirePayload {
        schema_version: index.schema_version.clone(),
        documents: index
            .documents
            .iter()
            .map(|doc| WireDocument {
                title: doc.title.clone(),
                source_ref: doc.source_ref.clone(),
            })
            .collect(),
        object_type_catalog: index
            .object_types
            .iter()
            .map(|(code, info)| (code.clone(), info.clone()))
            .collect(),
        objects: index
            .objects
            .iter()
            .map(|entry| WireObject {
                qualified_name: entry.qualified_name.clone(),
                type_code: entry.type_code.clone(),
                document_id: entry.document_id.get(),
                anchor_id: entry.anchor_id.clone(),
                display_name: entry.display_name.clone(),
            })
            .collect(),
        terms: index
            .terms
            .iter()
            .map(|(term, postings)| {
                (
                    term.clone(),
                    WirePostings {
                        document_ids: postings.iter().map(|p| p.document_id.get()).collect(),
                        weights: postings.iter().map(|p| p.weight).collect(),
                    },
                )
            })
            .collect(),
    };

    serde_json::to_string(&payload).expect("wire payload serialization cannot fail")
}

/// Decode a transport payload back into a usable index.
///
/// Validates the schema version and every cross-reference; any violation
/// rejects the whole payload.
pub fn decode(payload: &str) -> Result<SearchIndex, WireError> {
    let wire: WirePayload = serde_json::from_str(payload)?;

    if wire.schema_version != SCHEMA_VERSION {
        return Err(WireError::SchemaMismatch {
            found: wire.schema_version,
        });
    }

    let doc_count = wire.documents.len();

    let mut seen_names = HashSet::new();
    for object in &wire.objects {
        if DocId::new(object.document_id, doc_count).is_none() {
            return Err(MalformedIndex::ObjectDocOutOfRange {
                qualified_name: object.qualified_name.clone(),
                doc_id: object.document_id,
                doc_count,
            }
            .into());
        }
        if !wire.object_type_catalog.contains_key(&object.type_code) {
            return Err(MalformedIndex::UnknownTypeCode {
                qualified_name: object.qualified_name.clone(),
                type_code: object.type_code.clone(),
            }
            .into());
        }
        if !seen_names.insert(object.qualified_name.clone()) {
            return Err(MalformedIndex::DuplicateQualifiedName {
                qualified_name: object.qualified_name.clone(),
            }
            .into());
        }
    }

    let mut terms: HashMap<String, Vec<Posting>> = HashMap::with_capacity(wire.terms.len());
    for (term, postings) in wire.terms {
        if postings.document_ids.len() != postings.weights.len() {
            return Err(MalformedIndex::PostingArityMismatch {
                term,
                document_ids: postings.document_ids.len(),
                weights: postings.weights.len(),
            }
            .into());
        }

        let mut seen_docs = HashSet::new();
        let mut decoded = Vec::with_capacity(postings.document_ids.len());
        for (&raw_id, &weight) in postings.document_ids.iter().zip(&postings.weights) {
            let Some(document_id) = DocId::new(raw_id, doc_count) else {
                return Err(MalformedIndex::PostingDocOutOfRange {
                    term,
                    doc_id: raw_id,
                    doc_count,
                }
                .into());
            };
            if !seen_docs.insert(raw_id) {
                return Err(MalformedIndex::DuplicatePostingDoc { term, doc_id: raw_id }.into());
            }
            decoded.push(Posting {
                document_id,
                weight,
            });
        }
        terms.insert(term, decoded);
    }

    Ok(SearchIndex {
        schema_version: wire.schema_version,
        documents: wire
            .documents
            .into_iter()
            .enumerate()
            .map(|(position, doc)| Document {
                id: DocId(position as u32),
                title: doc.title,
                source_ref: doc.source_ref,
            })
            .collect(),
        objects: wire
            .objects
            .into_iter()
            .map(|object| ObjectEntry {
                qualified_name: object.qualified_name,
                type_code: object.type_code,
                document_id: DocId(object.document_id),
                anchor_id: object.anchor_id,
                display_name: object.display_name,
            })
            .collect(),
        terms,
        object_types: wire.object_type_catalog.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ObjectCatalog, ObjectTypeCatalog};
    use crate::index::{build_index, DocumentSource};
    use crate::tokenize::Tokenizer;

    fn sample_index() -> SearchIndex {
        let sources = vec![
            DocumentSource {
                id: 0,
                title: "Base Functions".to_string(),
                source_ref: "05_base.md".to_string(),
                body: "label mapping helpers".to_string(),
            },
            DocumentSource {
                id: 1,
                title: "Constants".to_string(),
                source_ref: "00_constants.md".to_string(),
                body: "country season split".to_string(),
            },
        ];
        let mut catalog = ObjectCatalog::new();
        catalog
            .add_object(ObjectEntry {
                qualified_name: "pkg.constants.Country".to_string(),
                type_code: "class".to_string(),
                document_id: DocId(1),
                anchor_id: "pkg.constants.Country".to_string(),
                display_name: "Country".to_string(),
            })
            .unwrap();
        build_index(
            &sources,
            &catalog,
            &ObjectTypeCatalog::standard(),
            &Tokenizer::default(),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_structure() {
        let index = sample_index();
        let decoded = decode(&encode(&index)).unwrap();
        assert_eq!(index, decoded);
    }

    #[test]
    fn encoding_is_deterministic() {
        let index = sample_index();
        assert_eq!(encode(&index), encode(&index));
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let mut index = sample_index();
        index.schema_version = "0".to_string();
        let err = decode(&encode(&index)).unwrap_err();
        assert!(matches!(err, WireError::SchemaMismatch { found } if found == "0"));
    }

    #[test]
    fn posting_referencing_a_missing_document_is_rejected() {
        let payload = r#"{
            "schemaVersion": "1",
            "documents": [
                {"title": "A", "sourceRef": "a.md"},
                {"title": "B", "sourceRef": "b.md"}
            ],
            "objectTypeCatalog": {},
            "objects": [],
            "terms": {"label": {"documentIds": [5], "weights": [5]}}
        }"#;
        let err = decode(payload).unwrap_err();
        assert!(matches!(
            err,
            WireError::Malformed(MalformedIndex::PostingDocOutOfRange { doc_id: 5, doc_count: 2, .. })
        ));
    }

    #[test]
    fn parallel_array_length_mismatch_is_rejected() {
        let payload = r#"{
            "schemaVersion": "1",
            "documents": [{"title": "A", "sourceRef": "a.md"}],
            "objectTypeCatalog": {},
            "objects": [],
            "terms": {"label": {"documentIds": [0], "weights": [5, 7]}}
        }"#;
        let err = decode(payload).unwrap_err();
        assert!(matches!(
            err,
            WireError::Malformed(MalformedIndex::PostingArityMismatch { .. })
        ));
    }

    #[test]
    fn duplicate_posting_document_is_rejected() {
        let payload = r#"{
            "schemaVersion": "1",
            "documents": [{"title": "A", "sourceRef": "a.md"}],
            "objectTypeCatalog": {},
            "objects": [],
            "terms": {"label": {"documentIds": [0, 0], "weights": [15, 5]}}
        }"#;
        let err = decode(payload).unwrap_err();
        assert!(matches!(
            err,
            WireError::Malformed(MalformedIndex::DuplicatePostingDoc { doc_id: 0, .. })
        ));
    }

    #[test]
    fn object_with_unknown_type_code_is_rejected() {
        let payload = r#"{
            "schemaVersion": "1",
            "documents": [{"title": "A", "sourceRef": "a.md"}],
            "objectTypeCatalog": {"class": {"displayName": "class", "searchPriority": 1}},
            "objects": [{"qualifiedName": "pkg.X", "typeCode": "enum",
                         "documentId": 0, "anchorId": "pkg.X", "displayName": "X"}],
            "terms": {}
        }"#;
        let err = decode(payload).unwrap_err();
        assert!(matches!(
            err,
            WireError::Malformed(MalformedIndex::UnknownTypeCode { .. })
        ));
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        assert!(matches!(decode("not json"), Err(WireError::Parse(_))));
    }
}
