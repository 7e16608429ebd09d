//! Posting weights.
//!
//! The weight of a posting encodes *where* a term matched, on a small
//! ordinal scale: a title hit outranks an object-name hit, which outranks a
//! body hit. Object-name hits additionally carry the per-type search
//! priority from the [`ObjectTypeCatalog`](crate::ObjectTypeCatalog).
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! ## MATCH_FIELD_DOMINANCE
//! The constants MUST satisfy, for every priority `p` a catalog can carry:
//!
//! ```text
//! TITLE_WEIGHT > OBJECT_WEIGHT + p > BODY_WEIGHT     for p in -4..=4
//! ```
//!
//! With current values: `15 > 10 + 4 = 14` and `10 - 4 = 6 > 5`. A catalog
//! priority outside `-4..=4` can invert the field ordering; `object_weight`
//! clamps to keep weights positive but deliberately does not hide a
//! misconfigured catalog beyond that.
//!
//! These are tunable configuration, not a wire contract: weights are data in
//! the serialized payload, so retuning the constants never invalidates
//! already-built indexes.

/// Weight for a term appearing in a document title.
pub const TITLE_WEIGHT: u32 = 15;

/// Base weight for a term appearing in an object's qualified or display
/// name. The type's search priority is added on top.
pub const OBJECT_WEIGHT: u32 = 10;

/// Weight for a term appearing in body text.
pub const BODY_WEIGHT: u32 = 5;

/// Weight for an object-name match of a type with the given priority.
#[inline]
pub fn object_weight(search_priority: i32) -> u32 {
    OBJECT_WEIGHT.saturating_add_signed(search_priority).max(1)
}
