//! Query evaluation and ranking.
//!
//! Pure reads over an immutable index snapshot: nothing here blocks,
//! suspends, or mutates, so one index can serve any number of concurrent
//! queries. Malformed or empty queries degrade to empty results - the
//! query path never raises.
//!
//! Multi-term queries are conjunctive: a document must hold a posting for
//! EVERY query term to appear at all. Documents matching only a common
//! word are excluded outright, not surfaced with a partial score.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::scoring::object_weight;
use crate::tokenize::Tokenizer;
use crate::types::{DocId, ObjectEntry, ScoredResult, SearchIndex};

/// Search the index, returning results ranked by descending score with
/// ascending-document-id tie breaks.
///
/// The query must be tokenized with the same tokenizer configuration used
/// at build time; anything else silently misses indexed terms. `limit`
/// truncates the ranked list (`None` = unrestricted).
pub fn search(
    index: &SearchIndex,
    tokenizer: &Tokenizer,
    query: &str,
    limit: Option<usize>,
) -> Vec<ScoredResult> {
    let terms = tokenizer.distinct_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    // Conjunctive AND: seed from the first term, then intersect each
    // remaining term, summing per-term weights.
    let mut doc_scores: HashMap<DocId, u32> = match index.terms.get(&terms[0]) {
        Some(postings) => postings
            .iter()
            .map(|p| (p.document_id, p.weight))
            .collect(),
        None => HashMap::new(),
    };

    for term in &terms[1..] {
        if doc_scores.is_empty() {
            break;
        }
        let term_weights: HashMap<DocId, u32> = match index.terms.get(term) {
            Some(postings) => postings
                .iter()
                .map(|p| (p.document_id, p.weight))
                .collect(),
            None => HashMap::new(),
        };
        doc_scores.retain(|doc_id, score| {
            if let Some(weight) = term_weights.get(doc_id) {
                *score += weight;
                true
            } else {
                false
            }
        });
    }

    // Objects whose names cover every query term, grouped by owning
    // document. The object-only score mirrors posting scoring: per term,
    // the best object weight for that document, summed across terms.
    let mut doc_objects: BTreeMap<DocId, Vec<ObjectEntry>> = BTreeMap::new();
    let mut object_scores: HashMap<DocId, u32> = HashMap::new();
    for entry in &index.objects {
        if !object_covers_terms(entry, &terms, tokenizer) {
            continue;
        }
        let weight = object_weight(
            index
                .object_types
                .get(&entry.type_code)
                .map_or(0, |info| info.search_priority),
        );
        let score = weight * terms.len() as u32;
        let best = object_scores.entry(entry.document_id).or_insert(0);
        if score > *best {
            *best = score;
        }
        doc_objects
            .entry(entry.document_id)
            .or_default()
            .push(entry.clone());
    }

    let mut results: Vec<ScoredResult> = doc_scores
        .into_iter()
        .map(|(document_id, score)| ScoredResult {
            document_id,
            score,
            matched_objects: doc_objects.remove(&document_id).unwrap_or_default(),
        })
        .collect();

    // Whatever is left matched only through its objects: synthesize a
    // result for the owning document with the object-only score.
    for (document_id, matched_objects) in doc_objects {
        let score = object_scores.get(&document_id).copied().unwrap_or(0);
        results.push(ScoredResult {
            document_id,
            score,
            matched_objects,
        });
    }

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.document_id.cmp(&b.document_id))
    });

    if let Some(limit) = limit {
        results.truncate(limit);
    }
    results
}

/// Does this object's qualified + display name cover every query term?
fn object_covers_terms(entry: &ObjectEntry, terms: &[String], tokenizer: &Tokenizer) -> bool {
    let name_terms: HashSet<String> = tokenizer
        .tokenize(&entry.qualified_name)
        .chain(tokenizer.tokenize(&entry.display_name))
        .collect();
    terms.iter().all(|term| name_terms.contains(term))
}
