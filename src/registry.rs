//! The canonical, ordered list of documents.
//!
//! Ids are dense, 0-based, and positional: a document's identity IS its
//! index into the registry. The builder assigns ids in traversal order and
//! they are stable thereafter - postings and object entries refer to
//! documents by these positions.

use crate::types::{DocId, Document};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and return its id (the next position).
    pub fn insert(&mut self, title: impl Into<String>, source_ref: impl Into<String>) -> DocId {
        let id = DocId(self.documents.len() as u32);
        self.documents.push(Document {
            id,
            title: title.into(),
            source_ref: source_ref.into(),
        });
        id
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id.as_usize())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Consume the registry, yielding the ordered document list for the
    /// index aggregate.
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}
