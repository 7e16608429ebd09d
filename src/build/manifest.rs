use std::collections::HashMap;

use serde::Deserialize;

use crate::types::ObjectTypeInfo;

/// Supported manifest version.
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json` at the root of the input directory: the document file
/// list (in traversal order) and, optionally, the object type table.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub version: u32,
    pub documents: Vec<String>,
    /// Type code -> display name + search priority. Empty means the
    /// standard documentation-generator types.
    #[serde(default)]
    pub object_types: HashMap<String, ObjectTypeInfo>,
}
