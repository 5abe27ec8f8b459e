use crate::ast::{Document, Node};
use crate::config::{ParseOptions, SerializeOptions};
use crate::error::{ParseError, SerializeError};
use crate::parser::Parser;
use crate::serialization::{to_value, Value};
use crate::writer::Writer;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.to_value();
        value.serialize(serializer)
    }
}

impl Document {
    /// Converts the document into a generic, serializable `Value`, keyed by
    /// the root element's name.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(BTreeMap::from([(self.name.clone(), to_value(&self.root))]))
    }

    /// Renders the document's data as a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Renders the document's data as a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }

    /// Writes the document back to markup. The root element keeps the
    /// document's own name whatever `options.root_name` says.
    ///
    /// # Errors
    /// Returns `SerializeError::UnsupportedInput` if the tree holds names
    /// that cannot be written.
    pub fn to_xml(&self, options: &SerializeOptions) -> Result<Vec<u8>, SerializeError> {
        let options = SerializeOptions {
            root_name: self.name.clone(),
            ..options.clone()
        };
        serialize(&self.root, &options)
    }
}

/// Parses a markup buffer into a `Document` with default options.
///
/// # Errors
/// Returns `ParseError::UnsupportedInput` for a buffer that is not UTF-8,
/// and `ParseError::MalformedMarkup` for unbalanced or unparseable markup.
pub fn parse(buffer: &[u8]) -> Result<Document, ParseError> {
    parse_with_options(buffer, "source.xml", &ParseOptions::default())
}

/// Parses a markup buffer, naming it `source_name` in diagnostics.
///
/// # Errors
/// See [`parse`]; additionally `ParseError::NestingTooDeep` when the
/// document is nested deeper than `options.max_depth`.
pub fn parse_with_options(
    buffer: &[u8],
    source_name: &str,
    options: &ParseOptions,
) -> Result<Document, ParseError> {
    let text = std::str::from_utf8(buffer).map_err(|e| ParseError::UnsupportedInput {
        reason: format!("{source_name} is not valid UTF-8: {e}"),
    })?;
    let parser = Parser::new_with_name(text, source_name.to_string(), options.clone())?;
    parser.parse_document()
}

/// Writes `node` as a complete document whose root element is
/// `options.root_name`. Lines end with CRLF.
///
/// # Errors
/// Returns `SerializeError::UnsupportedInput` if the root name, a child
/// name or an attribute name cannot be written, or the tree is nested deeper
/// than `options.max_depth`.
pub fn serialize(node: &Node, options: &SerializeOptions) -> Result<Vec<u8>, SerializeError> {
    Writer::new(options)
        .write_document(node)
        .map(String::into_bytes)
}
