use serde::{Deserialize, Serialize};

/// Settings for reading markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest element nesting accepted before parsing aborts.
    pub max_depth: usize,
    /// When the extractor runs off the end of the tag table while skipping
    /// stray close tags, produce an empty text node carrying the last tag's
    /// attributes instead of failing.
    pub lenient: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            lenient: false,
        }
    }
}

/// Settings for writing markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    pub root_name: String,
    /// Written as `xsi:noNamespaceSchemaLocation` on the root element.
    pub schema_location: Option<String>,
    /// Written as the `encoding` pseudo-attribute of the XML declaration.
    pub encoding: Option<String>,
    /// Emit a header comment with the local time of writing.
    pub timestamp_comment: bool,
    /// Indentation added per nesting level.
    pub indent: String,
    /// Deepest element nesting the writer accepts; matches the reader's
    /// default so anything written can be read back.
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            root_name: "root".to_string(),
            schema_location: None,
            encoding: None,
            timestamp_comment: false,
            indent: "  ".to_string(),
            max_depth: 256,
        }
    }
}

impl SerializeOptions {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            ..Self::default()
        }
    }
}
