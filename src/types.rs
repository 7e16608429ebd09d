// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search index.
//!
//! These types define how documents, API objects, and weighted postings fit
//! together. The aggregate root is [`SearchIndex`]: everything a consumer
//! needs to answer queries offline, with no server round-trip.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Document identity**: `documents[i].id == i`. Ids are dense, 0-based,
//!   and positional. Off-by-one here means every posting points at the wrong
//!   page.
//!
//! - **Posting dedup**: for a given term, at most one posting per document.
//!   Repeated occurrences raise the weight (max, not sum), never append.
//!
//! - **Posting order**: descending weight, ties by ascending document id.
//!   Builds must be reproducible byte-for-byte.
//!
//! - **Object references**: every `ObjectEntry.document_id` indexes into
//!   `documents`. The decoder refuses payloads that violate this.
//!
//! The index is immutable after construction. All mutation happens through a
//! rebuild, so concurrent readers always observe a consistent snapshot.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Prevents accidentally passing a weight or an arena slot where a document
/// id is expected. Use `DocId::new()` for runtime-validated construction, or
/// `.into()` for trusted sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One documentation page in the registry.
///
/// The `id` field is the position in the registry - everything else is
/// metadata for displaying results. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocId,
    pub title: String,
    /// Source file identifier (e.g. `intro.md`), opaque to the engine.
    pub source_ref: String,
}

/// A (document, weight) pair recorded for a term.
///
/// The weight encodes *where* the term matched: title beats object name
/// beats body text. See `scoring` for the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub document_id: DocId,
    pub weight: u32,
}

// =============================================================================
// OBJECT TYPES
// =============================================================================

/// An indexable API symbol: module, class, function, attribute, method.
///
/// Objects form a forest, not a graph: each entry belongs to exactly one
/// document and at most one parent, resolved lazily by dotted-name prefix
/// (see `catalog`). No parent pointers are stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    /// Fully-scoped dotted identifier, e.g. `pkg.constants.Country`.
    pub qualified_name: String,
    /// Short type code resolved through the [`ObjectTypeCatalog`].
    pub type_code: String,
    /// The page where this symbol is defined.
    pub document_id: DocId,
    /// Fragment identifier on that page.
    pub anchor_id: String,
    /// Human-readable name, usually the last dotted segment.
    pub display_name: String,
}

/// Display name and search priority for one object type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeInfo {
    pub display_name: String,
    /// Added to the base object weight when scoring name matches.
    /// Negative values deprioritize a type without hiding it.
    pub search_priority: i32,
}

// =============================================================================
// THE INDEX
// =============================================================================

/// The aggregate root: everything needed to serve queries.
///
/// Owned exclusively by whichever component last built or loaded it.
/// Immutable after construction, so it can be shared across arbitrarily many
/// concurrent readers without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    /// Opaque compatibility token. Indexes from a different toolchain
    /// version are rejected at load time, never silently merged.
    pub schema_version: String,
    /// Position = document id.
    pub documents: Vec<Document>,
    pub objects: Vec<ObjectEntry>,
    /// Inverted index: term -> postings, sorted by descending weight then
    /// ascending document id.
    pub terms: HashMap<String, Vec<Posting>>,
    /// Type code -> display name + search priority.
    pub object_types: HashMap<String, ObjectTypeInfo>,
}

impl SearchIndex {
    /// Number of documents in the registry.
    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub document_id: DocId,
    pub score: u32,
    /// Objects whose names cover the whole query, owned by this document.
    pub matched_objects: Vec<ObjectEntry>,
}

// =============================================================================
// BUILD ERRORS
// =============================================================================

/// Fatal structural problems in the source corpus. Never recovered
/// automatically - the invoking pipeline aborts and the corpus gets fixed
/// upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The same document id was assigned twice.
    DuplicateDocumentId { doc_id: u32 },
    /// An object with this qualified name already exists in the catalog.
    DuplicateQualifiedName { qualified_name: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateDocumentId { doc_id } => {
                write!(f, "duplicate document id {}", doc_id)
            }
            BuildError::DuplicateQualifiedName { qualified_name } => {
                write!(f, "duplicate qualified name '{}'", qualified_name)
            }
        }
    }
}

impl Error for BuildError {}
