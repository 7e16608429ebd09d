//! Compact offline search index for generated documentation sites.
//!
//! This crate builds the search index a documentation generator ships next
//! to its static pages: document titles, page text terms, and a catalog of
//! API objects (modules, classes, functions, attributes, methods), merged
//! into a weighted inverted index, serialized into a compact versioned
//! payload, and queried client-side with zero server round-trips.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenize.rs  │────▶│   index.rs   │────▶│   wire.rs    │
//! │ (Tokenizer,  │     │ (build_index,│     │  (encode,    │
//! │  Stem)       │     │  postings)   │     │   decode)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │               ▲         ▲               │
//!        │        ┌──────┘         └──────┐        ▼
//!        │  ┌───────────┐        ┌─────────────┐ ┌──────────────┐
//!        └─▶│ catalog.rs│        │ registry.rs │ │  search.rs   │
//!           │ (objects) │        │ (documents) │ │  (queries)   │
//!           └───────────┘        └─────────────┘ └──────────────┘
//! ```
//!
//! Construction is a single batch pass per site build; the resulting
//! [`SearchIndex`] is immutable and freely shared across concurrent
//! readers. The same [`Tokenizer`] value must be used on both sides of the
//! wire - index-time and query-time normalization have to agree exactly.
//!
//! # Usage
//!
//! ```ignore
//! use ferret::{build_index, search, DocumentSource, ObjectCatalog,
//!              ObjectTypeCatalog, Tokenizer};
//!
//! let tokenizer = Tokenizer::default();
//! let index = build_index(&sources, &catalog,
//!                         &ObjectTypeCatalog::standard(), &tokenizer)?;
//!
//! let payload = ferret::encode(&index);          // ship this file
//! let loaded = ferret::decode(&payload)?;        // consumer side
//! let results = search(&loaded, &tokenizer, "country season", Some(10));
//! ```

// Module declarations
pub mod build;
mod catalog;
mod index;
mod registry;
mod scoring;
mod search;
mod tokenize;
mod types;
mod wire;

// Re-exports for public API
pub use catalog::{ObjectCatalog, ObjectTypeCatalog};
pub use index::{build_index, build_index_parallel, DocumentSource};
pub use registry::DocumentRegistry;
pub use scoring::{object_weight, BODY_WEIGHT, OBJECT_WEIGHT, TITLE_WEIGHT};
pub use search::search;
pub use tokenize::{normalize, Stem, Tokenizer, DEFAULT_MIN_TERM_LEN};
pub use types::{
    BuildError, DocId, Document, ObjectEntry, ObjectTypeInfo, Posting, ScoredResult, SearchIndex,
};
pub use wire::{decode, encode, MalformedIndex, WireError, SCHEMA_VERSION};
