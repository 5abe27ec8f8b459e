use crate::ast::{ChildValue, Content, Node};
use serde::Serialize;
use std::collections::BTreeMap;

/// Key holding an element's attributes in the exported value.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Key holding the text of an element that also has attributes.
pub const TEXT_KEY: &str = "#text";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

pub(crate) fn to_value(node: &Node) -> Value {
    let body = match &node.content {
        Content::Absent => None,
        Content::Text(text) => Some(Value::String(text.clone())),
        Content::Children(children) => Some(Value::Object(
            children
                .iter()
                .map(|field| (field.key.clone(), child_to_value(&field.value)))
                .collect(),
        )),
    };

    if node.attributes.is_empty() {
        return body.unwrap_or(Value::Null);
    }

    // Attributes need an object to live in; text moves under its own key.
    let mut map = match body {
        Some(Value::Object(map)) => map,
        Some(text) => BTreeMap::from([(TEXT_KEY.to_string(), text)]),
        None => BTreeMap::new(),
    };
    let attributes = node
        .attributes
        .iter()
        .map(|a| (a.name.clone(), Value::String(a.value.clone())))
        .collect();
    map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    Value::Object(map)
}

fn child_to_value(value: &ChildValue) -> Value {
    match value {
        ChildValue::Single(node) => to_value(node),
        // Both list shapes export the same way; the distinction only matters
        // to the writer.
        ChildValue::Array(nodes) | ChildValue::Heterogeneous(nodes) => {
            Value::Array(nodes.iter().map(to_value).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Children;

    #[test]
    fn test_plain_shapes() {
        assert_eq!(to_value(&Node::absent()), Value::Null);
        assert_eq!(to_value(&Node::text("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_attributes_wrap_text() {
        let value = to_value(&Node::text("80").with_attribute("proto", "tcp"));
        let expected = Value::Object(BTreeMap::from([
            (TEXT_KEY.to_string(), Value::String("80".to_string())),
            (
                ATTRIBUTES_KEY.to_string(),
                Value::Object(BTreeMap::from([(
                    "proto".to_string(),
                    Value::String("tcp".to_string()),
                )])),
            ),
        ]));
        assert_eq!(value, expected);
    }

    #[test]
    fn test_lists_export_as_arrays() {
        let node = Node::children(
            Children::new()
                .with("c", Node::text("1"))
                .with("c", Node::absent()),
        );
        let expected = Value::Object(BTreeMap::from([(
            "c".to_string(),
            Value::Array(vec![Value::String("1".to_string()), Value::Null]),
        )]));
        assert_eq!(to_value(&node), expected);
    }
}
