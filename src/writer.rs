use crate::ast::{Attribute, Content, Node};
use crate::config::SerializeOptions;
use crate::error::SerializeError;
use crate::escape;
use crate::utils::is_valid_name;

const NEWLINE: &str = "\r\n";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Writes a tree back out as markup, the inverse of `Parser`.
pub struct Writer<'o> {
    options: &'o SerializeOptions,
    out: String,
}

impl<'o> Writer<'o> {
    pub fn new(options: &'o SerializeOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    /// Writes `root` as the document element named `options.root_name`.
    ///
    /// The whole tree is validated before any output is produced.
    ///
    /// # Errors
    /// Returns `SerializeError::UnsupportedInput` for names that could not
    /// be read back, or for a tree nested deeper than `options.max_depth`.
    pub fn write_document(mut self, root: &Node) -> Result<String, SerializeError> {
        let options = self.options;
        validate(&options.root_name, root, 0, options.max_depth)?;

        self.write_prolog();
        let attributes = self.root_attributes(root);
        self.write_element(&options.root_name, root, &attributes, 0);

        log::debug!(
            "wrote document <{}> ({} bytes)",
            options.root_name,
            self.out.len()
        );
        Ok(self.out)
    }

    fn write_prolog(&mut self) {
        self.out.push_str("<?xml version=\"1.0\"");
        if let Some(encoding) = &self.options.encoding {
            self.out.push_str(" encoding=\"");
            self.out.push_str(&escape::encode(encoding));
            self.out.push('"');
        }
        self.out.push_str("?>");
        self.out.push_str(NEWLINE);

        if self.options.timestamp_comment {
            let now = chrono::Local::now();
            self.out.push_str(&format!(
                "<!-- Written by {} on {} -->",
                env!("CARGO_PKG_NAME"),
                now.format("%Y-%m-%d %H:%M:%S")
            ));
            self.out.push_str(NEWLINE);
        }
    }

    /// Schema attributes go first, unless the root already carries them.
    fn root_attributes(&self, root: &Node) -> Vec<Attribute> {
        let mut attributes = Vec::with_capacity(root.attributes.len() + 2);
        if let Some(location) = &self.options.schema_location {
            for (name, value) in [
                ("xmlns:xsi", XSI_NAMESPACE),
                ("xsi:noNamespaceSchemaLocation", location.as_str()),
            ] {
                if root.attribute(name).is_none() {
                    attributes.push(Attribute::new(name, value));
                }
            }
        }
        attributes.extend(root.attributes.iter().cloned());
        attributes
    }

    fn write_element(&mut self, name: &str, node: &Node, attributes: &[Attribute], depth: usize) {
        let indent = self.options.indent.repeat(depth);
        self.out.push_str(&indent);
        self.out.push('<');
        self.out.push_str(name);
        for attribute in attributes {
            self.out.push(' ');
            self.out.push_str(&attribute.name);
            self.out.push_str("=\"");
            self.out.push_str(&escape::encode(&attribute.value));
            self.out.push('"');
        }

        match &node.content {
            Content::Absent => self.out.push_str("/>"),
            Content::Text(text) => {
                self.out.push('>');
                self.out.push_str(&escape::encode(text));
                self.write_close(name);
            }
            Content::Children(children) => {
                self.out.push('>');
                self.out.push_str(NEWLINE);
                for field in children {
                    for child in field.value.nodes() {
                        self.write_element(&field.key, child, &child.attributes, depth + 1);
                    }
                }
                self.out.push_str(&indent);
                self.write_close(name);
            }
        }
        self.out.push_str(NEWLINE);
    }

    fn write_close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }
}

/// Checks names and depth before anything is written, so `write_element`
/// only ever recurses over trees that passed here.
fn validate(name: &str, node: &Node, depth: usize, limit: usize) -> Result<(), SerializeError> {
    if depth >= limit {
        return Err(unsupported(format!(
            "<{name}> is nested more than {limit} levels deep"
        )));
    }
    if !is_valid_name(name) {
        return Err(unsupported(format!("invalid element name {name:?}")));
    }
    if let Some(attribute) = node.attributes.iter().find(|a| !is_valid_name(&a.name)) {
        return Err(unsupported(format!(
            "invalid attribute name {:?} on <{name}>",
            attribute.name
        )));
    }

    if let Content::Children(children) = &node.content {
        for field in children {
            for child in field.value.nodes() {
                validate(&field.key, child, depth + 1, limit)?;
            }
        }
    }
    Ok(())
}

fn unsupported(reason: String) -> SerializeError {
    SerializeError::UnsupportedInput { reason }
}
