// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading and index construction.
//!
//! The expensive parts of a site build are (1) loading document JSON from
//! disk and (2) tokenizing everything into the index. Both are
//! embarrassingly parallel, and rayon makes the fan-out trivial. The merge
//! step applies the same max-weight rule as the serial accumulator, so a
//! sharded build is byte-identical to a sequential one.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::build::{Document, InputManifest};
use crate::catalog::{ObjectCatalog, ObjectTypeCatalog};
use crate::index::{build_index_parallel, DocumentSource};
use crate::tokenize::Tokenizer;
use crate::types::{DocId, ObjectEntry, SearchIndex};

/// A built index ready to serialize.
pub struct BuiltIndex {
    pub index: SearchIndex,
    pub payload: String,
}

/// Load all documents listed in the manifest, in parallel.
///
/// Hard-fails on unreadable or invalid files: a half-loaded corpus would
/// build a valid-looking index with silently missing pages.
#[cfg(feature = "parallel")]
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>, String> {
    manifest
        .documents
        .par_iter()
        .map(|filename| read_document(input_dir, filename))
        .collect::<Result<Vec<Document>, _>>()
        .map(sort_by_id)
}

/// Sequential fallback for non-parallel builds.
#[cfg(not(feature = "parallel"))]
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>, String> {
    manifest
        .documents
        .iter()
        .map(|filename| read_document(input_dir, filename))
        .collect::<Result<Vec<Document>, _>>()
        .map(sort_by_id)
}

/// Load documents, ticking a progress bar per file.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> Result<Vec<Document>, String> {
    manifest
        .documents
        .par_iter()
        .map(|filename| {
            let doc = read_document(input_dir, filename);
            progress.inc(1);
            doc
        })
        .collect::<Result<Vec<Document>, _>>()
        .map(sort_by_id)
}

fn read_document(input_dir: &Path, filename: &str) -> Result<Document, String> {
    let path = input_dir.join(filename);
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str::<Document>(&content)
        .map_err(|e| format!("Invalid JSON in {}: {}", filename, e))
}

/// Sort by the generator's id to keep ordering consistent regardless of
/// manifest order or parallel completion order.
fn sort_by_id(mut docs: Vec<Document>) -> Vec<Document> {
    docs.sort_by_key(|d| d.id);
    docs
}

/// Split loaded documents into builder sources and an object catalog.
///
/// Document ids become registry positions here; object entries get their
/// owning document's position as `document_id`.
pub fn assemble(documents: &[Document]) -> Result<(Vec<DocumentSource>, ObjectCatalog), String> {
    let mut sources = Vec::with_capacity(documents.len());
    let mut catalog = ObjectCatalog::new();

    for (position, doc) in documents.iter().enumerate() {
        sources.push(DocumentSource {
            id: doc.id,
            title: doc.title.clone(),
            source_ref: doc.source_ref.clone(),
            body: doc.text.clone(),
        });

        for spec in &doc.objects {
            catalog
                .add_object(ObjectEntry {
                    qualified_name: spec.qualified_name.clone(),
                    type_code: spec.type_code.clone(),
                    document_id: DocId(position as u32),
                    anchor_id: spec.anchor().to_string(),
                    display_name: spec.display().to_string(),
                })
                .map_err(|e| format!("{} (in {})", e, doc.source_ref))?;
        }
    }

    Ok((sources, catalog))
}

/// Build the index and encode its transport payload.
pub fn build_payload(
    sources: &[DocumentSource],
    catalog: &ObjectCatalog,
    types: &ObjectTypeCatalog,
    tokenizer: &Tokenizer,
) -> Result<BuiltIndex, String> {
    let index = build_index_parallel(sources, catalog, types, tokenizer)
        .map_err(|e| format!("Index build failed: {}", e))?;
    let payload = crate::wire::encode(&index);
    Ok(BuiltIndex { index, payload })
}
