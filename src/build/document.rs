use serde::{Deserialize, Serialize};

/// One input document as the documentation generator emits it: page
/// metadata, extracted body text, and the API objects defined on the page.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub source_ref: String,
    pub text: String,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

/// An API object declared by an input document.
///
/// Generators routinely leave `anchorId` empty (meaning "the anchor is the
/// qualified name") and omit `displayName` (meaning "the last dotted
/// segment"); both defaults are applied during catalog assembly.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSpec {
    pub qualified_name: String,
    pub type_code: String,
    #[serde(default)]
    pub anchor_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ObjectSpec {
    /// Anchor with the empty-means-qualified-name default applied.
    pub fn anchor(&self) -> &str {
        if self.anchor_id.is_empty() {
            &self.qualified_name
        } else {
            &self.anchor_id
        }
    }

    /// Display name with the last-dotted-segment default applied.
    pub fn display(&self) -> &str {
        match &self.display_name {
            Some(name) => name,
            None => self
                .qualified_name
                .rsplit('.')
                .next()
                .unwrap_or(&self.qualified_name),
        }
    }
}
