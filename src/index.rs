// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Single-pass batch operation, run once per documentation build. Consumes
//! tokenized titles, body text, and object names; emits term -> postings
//! with one weight per (term, document) pair.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_DEDUP**: at most one posting per (term, document). Repeated
//!    occurrences take the MAXIMUM weight observed, never the sum - a term
//!    in both title and body ranks by its strongest signal, so verbose
//!    pages aren't rewarded for repetition.
//! 2. **POSTING_ORDER**: postings sorted by descending weight, ties by
//!    ascending document id. Builds are reproducible.
//! 3. **PARALLEL_EQUIVALENCE**: the sharded build merges per-document
//!    shards with the same max-weight rule, so its output is identical to
//!    the serial build regardless of worker scheduling.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::{ObjectCatalog, ObjectTypeCatalog};
use crate::registry::DocumentRegistry;
use crate::scoring::{object_weight, BODY_WEIGHT, TITLE_WEIGHT};
use crate::tokenize::Tokenizer;
use crate::types::{BuildError, DocId, ObjectEntry, Posting, SearchIndex};
use crate::wire::SCHEMA_VERSION;

/// One document's raw material for the builder.
///
/// The `id` field is the generator's ordering key: the pipeline sorts by it
/// and the builder checks it for duplicates. The index id is the position
/// in traversal order, dense and stable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub id: u32,
    pub title: String,
    pub source_ref: String,
    pub body: String,
}

/// Per-document posting shard: term -> (doc -> max weight).
type Shard = HashMap<String, HashMap<DocId, u32>>;

/// Record a match, keeping the maximum weight per (term, document).
fn emit(shard: &mut Shard, term: String, doc_id: DocId, weight: u32) {
    let slot = shard.entry(term).or_default().entry(doc_id).or_insert(0);
    if weight > *slot {
        *slot = weight;
    }
}

/// Tokenize one document (and its objects) into a posting shard.
fn shard_document(
    doc_id: DocId,
    source: &DocumentSource,
    objects: &[&ObjectEntry],
    types: &ObjectTypeCatalog,
    tokenizer: &Tokenizer,
) -> Shard {
    let mut shard = Shard::new();

    for term in tokenizer.tokenize(&source.title) {
        emit(&mut shard, term, doc_id, TITLE_WEIGHT);
    }
    for term in tokenizer.tokenize(&source.body) {
        emit(&mut shard, term, doc_id, BODY_WEIGHT);
    }
    for object in objects {
        let weight = object_weight(types.priority(&object.type_code));
        for term in tokenizer.tokenize(&object.qualified_name) {
            emit(&mut shard, term, doc_id, weight);
        }
        for term in tokenizer.tokenize(&object.display_name) {
            emit(&mut shard, term, doc_id, weight);
        }
    }

    shard
}

/// Merge a shard into the accumulator with the max-weight rule.
fn merge_shard(into: &mut Shard, shard: Shard) {
    for (term, docs) in shard {
        let slot = into.entry(term).or_default();
        for (doc_id, weight) in docs {
            let entry = slot.entry(doc_id).or_insert(0);
            if weight > *entry {
                *entry = weight;
            }
        }
    }
}

/// Check ids and register documents in traversal order.
fn register_documents(sources: &[DocumentSource]) -> Result<DocumentRegistry, BuildError> {
    let mut seen = std::collections::HashSet::new();
    let mut registry = DocumentRegistry::new();
    for source in sources {
        if !seen.insert(source.id) {
            return Err(BuildError::DuplicateDocumentId { doc_id: source.id });
        }
        registry.insert(source.title.clone(), source.source_ref.clone());
    }
    Ok(registry)
}

/// Group catalog entries by owning document.
///
/// Entry document ids are issued by the pipeline from registry positions,
/// so they are in range by construction.
fn objects_by_document<'a>(
    catalog: &'a ObjectCatalog,
    doc_count: usize,
) -> Vec<Vec<&'a ObjectEntry>> {
    let mut by_doc: Vec<Vec<&ObjectEntry>> = vec![Vec::new(); doc_count];
    for entry in catalog.entries() {
        debug_assert!(entry.document_id.as_usize() < doc_count);
        if let Some(slot) = by_doc.get_mut(entry.document_id.as_usize()) {
            slot.push(entry);
        }
    }
    by_doc
}

/// Sort postings (descending weight, ascending document id) and assemble
/// the aggregate.
fn finalize(
    registry: DocumentRegistry,
    catalog: &ObjectCatalog,
    types: &ObjectTypeCatalog,
    accumulated: Shard,
) -> SearchIndex {
    let terms: HashMap<String, Vec<Posting>> = accumulated
        .into_iter()
        .map(|(term, docs)| {
            let mut postings: Vec<Posting> = docs
                .into_iter()
                .map(|(document_id, weight)| Posting {
                    document_id,
                    weight,
                })
                .collect();
            postings.sort_by(|a, b| {
                b.weight
                    .cmp(&a.weight)
                    .then(a.document_id.cmp(&b.document_id))
            });
            (term, postings)
        })
        .collect();

    SearchIndex {
        schema_version: SCHEMA_VERSION.to_string(),
        documents: registry.into_documents(),
        objects: catalog.entries().to_vec(),
        terms,
        object_types: types.as_types().clone(),
    }
}

/// Build a search index from document sources and an object catalog.
///
/// An empty document set yields a valid empty index. A duplicate document
/// id aborts the build - that is a generator bug to fix upstream, not a
/// condition to paper over.
pub fn build_index(
    sources: &[DocumentSource],
    catalog: &ObjectCatalog,
    types: &ObjectTypeCatalog,
    tokenizer: &Tokenizer,
) -> Result<SearchIndex, BuildError> {
    let registry = register_documents(sources)?;
    let by_doc = objects_by_document(catalog, registry.len());

    let mut accumulated = Shard::new();
    for (position, source) in sources.iter().enumerate() {
        let doc_id = DocId(position as u32);
        let shard = shard_document(doc_id, source, &by_doc[position], types, tokenizer);
        merge_shard(&mut accumulated, shard);
    }

    Ok(finalize(registry, catalog, types, accumulated))
}

/// Build a search index using parallel map-reduce.
///
/// Map phase shards per document; reduce phase merges shards with the same
/// max-weight rule as the serial build, so the result is order-independent
/// and identical to [`build_index`].
#[cfg(feature = "parallel")]
pub fn build_index_parallel(
    sources: &[DocumentSource],
    catalog: &ObjectCatalog,
    types: &ObjectTypeCatalog,
    tokenizer: &Tokenizer,
) -> Result<SearchIndex, BuildError> {
    let registry = register_documents(sources)?;
    let by_doc = objects_by_document(catalog, registry.len());

    let shards: Vec<Shard> = sources
        .par_iter()
        .enumerate()
        .map(|(position, source)| {
            shard_document(
                DocId(position as u32),
                source,
                &by_doc[position],
                types,
                tokenizer,
            )
        })
        .collect();

    let mut accumulated = Shard::new();
    for shard in shards {
        merge_shard(&mut accumulated, shard);
    }

    Ok(finalize(registry, catalog, types, accumulated))
}

/// Sequential fallback for non-parallel builds.
#[cfg(not(feature = "parallel"))]
pub fn build_index_parallel(
    sources: &[DocumentSource],
    catalog: &ObjectCatalog,
    types: &ObjectTypeCatalog,
    tokenizer: &Tokenizer,
) -> Result<SearchIndex, BuildError> {
    build_index(sources, catalog, types, tokenizer)
}
