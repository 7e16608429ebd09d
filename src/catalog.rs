// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Symbol catalog: the hierarchical namespace of indexable API objects.
//!
//! Documentation generators emit symbols in arbitrary module-traversal
//! order, so the catalog never requires parents before children. The
//! hierarchy is implicit in the qualified names: entries live in a flat
//! arena with a name lookup table, and a parent is resolved lazily as the
//! longest registered proper dot-prefix. No parent pointers, no child
//! lists, no cycle bookkeeping - a name either has a registered prefix or
//! it is a root.

use std::collections::HashMap;

use crate::types::{BuildError, ObjectEntry, ObjectTypeInfo};

// =============================================================================
// OBJECT TYPE CATALOG
// =============================================================================

/// The static table of object types: short code -> display name + search
/// priority. Read-only after load, threaded explicitly through the builder
/// and the query engine rather than living in a process-wide singleton.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectTypeCatalog {
    types: HashMap<String, ObjectTypeInfo>,
}

impl ObjectTypeCatalog {
    /// The type set a typical documentation generator emits.
    pub fn standard() -> Self {
        let mut catalog = ObjectTypeCatalog::default();
        catalog.insert("module", "module", 0);
        catalog.insert("class", "class", 1);
        catalog.insert("function", "function", 1);
        catalog.insert("method", "method", 1);
        catalog.insert("attribute", "attribute", 0);
        catalog
    }

    pub fn from_types(types: HashMap<String, ObjectTypeInfo>) -> Self {
        ObjectTypeCatalog { types }
    }

    pub fn insert(&mut self, code: &str, display_name: &str, search_priority: i32) {
        self.types.insert(
            code.to_string(),
            ObjectTypeInfo {
                display_name: display_name.to_string(),
                search_priority,
            },
        );
    }

    pub fn get(&self, code: &str) -> Option<&ObjectTypeInfo> {
        self.types.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.types.contains_key(code)
    }

    /// Search priority for a type code. Unknown codes rank neutrally.
    pub fn priority(&self, code: &str) -> i32 {
        self.types.get(code).map_or(0, |info| info.search_priority)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_types(self) -> HashMap<String, ObjectTypeInfo> {
        self.types
    }

    pub fn as_types(&self) -> &HashMap<String, ObjectTypeInfo> {
        &self.types
    }
}

// =============================================================================
// OBJECT CATALOG
// =============================================================================

/// Flat arena of object entries plus a qualified-name lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectCatalog {
    entries: Vec<ObjectEntry>,
    by_name: HashMap<String, usize>,
}

impl ObjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object.
    ///
    /// Qualified names are globally unique; a second insertion of the same
    /// name is a fatal corpus bug. Children may arrive before their parents.
    pub fn add_object(&mut self, entry: ObjectEntry) -> Result<(), BuildError> {
        if self.by_name.contains_key(&entry.qualified_name) {
            return Err(BuildError::DuplicateQualifiedName {
                qualified_name: entry.qualified_name,
            });
        }
        self.by_name
            .insert(entry.qualified_name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, qualified_name: &str) -> Option<&ObjectEntry> {
        self.by_name
            .get(qualified_name)
            .map(|&slot| &self.entries[slot])
    }

    /// Resolve the parent of a qualified name: the longest registered
    /// proper dot-prefix. Roots (and unknown names with no registered
    /// prefix) resolve to `None`.
    pub fn resolve_parent(&self, qualified_name: &str) -> Option<&ObjectEntry> {
        let mut prefix = qualified_name;
        while let Some(dot) = prefix.rfind('.') {
            prefix = &prefix[..dot];
            if let Some(&slot) = self.by_name.get(prefix) {
                return Some(&self.entries[slot]);
            }
        }
        None
    }

    /// All entries scoped under a qualified name, in insertion order.
    pub fn descendants_of<'a>(
        &'a self,
        qualified_name: &'a str,
    ) -> impl Iterator<Item = &'a ObjectEntry> {
        self.entries.iter().filter(move |entry| {
            entry
                .qualified_name
                .strip_prefix(qualified_name)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub fn entries(&self) -> &[ObjectEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ObjectEntry> {
        self.entries
    }
}
