/// A parsed document: the root element's tag name and its node.
#[derive(Debug, PartialEq, Clone)]
pub struct Document {
    pub name: String,
    pub root: Node,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One element of the tree. The element's own tag name is held by its parent
/// (as the key it is stored under) or by the enclosing `Document`.
#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    pub content: Content,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Content {
    /// Self-closing element, `<a/>`.
    Absent,
    /// Character data, possibly empty: `<a></a>`, `<a>text</a>`.
    Text(String),
    /// Nested elements.
    Children(Children),
}

#[derive(Debug, PartialEq, Clone)]
pub enum ChildValue {
    Single(Node),
    /// Same-named siblings that all share one shape.
    Array(Vec<Node>),
    /// Same-named siblings of differing shape.
    Heterogeneous(Vec<Node>),
}

/// A named entry of a complex element.
#[derive(Debug, PartialEq, Clone)]
pub struct Field {
    pub key: String,
    pub value: ChildValue,
}

/// Insertion-ordered mapping from tag name to the sibling(s) carrying it.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Children {
    fields: Vec<Field>,
}

impl Node {
    pub fn absent() -> Self {
        Self {
            content: Content::Absent,
            attributes: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
            attributes: Vec::new(),
        }
    }

    pub fn children(children: Children) -> Self {
        Self {
            content: Content::Children(children),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_children(&self) -> Option<&Children> {
        match &self.content {
            Content::Children(c) => Some(c),
            _ => None,
        }
    }

    /// Two nodes share a shape when they have the same content variant, the
    /// same attribute names in the same order, and (for complex content) the
    /// same set of child keys.
    pub fn is_compatible_with(&self, other: &Node) -> bool {
        let same_attributes = self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(&other.attributes)
                .all(|(a, b)| a.name == b.name);
        if !same_attributes {
            return false;
        }

        match (&self.content, &other.content) {
            (Content::Absent, Content::Absent) | (Content::Text(_), Content::Text(_)) => true,
            (Content::Children(a), Content::Children(b)) => {
                a.len() == b.len() && a.keys().all(|k| b.contains_key(k))
            }
            _ => false,
        }
    }
}

impl ChildValue {
    /// Folds one more same-named sibling into this value.
    ///
    /// Never fails: when shapes disagree the value degrades to
    /// `Heterogeneous`, keeping every node in arrival order.
    #[must_use]
    pub fn merge(self, node: Node) -> ChildValue {
        match self {
            ChildValue::Single(first) => {
                if first.is_compatible_with(&node) {
                    ChildValue::Array(vec![first, node])
                } else {
                    log::debug!("siblings differ in shape, keeping them as a heterogeneous list");
                    ChildValue::Heterogeneous(vec![first, node])
                }
            }
            ChildValue::Array(mut nodes) => {
                let compatible = nodes.first().map_or(true, |n| n.is_compatible_with(&node));
                nodes.push(node);
                if compatible {
                    ChildValue::Array(nodes)
                } else {
                    log::debug!(
                        "sibling {} differs in shape, demoting array to a heterogeneous list",
                        nodes.len()
                    );
                    ChildValue::Heterogeneous(nodes)
                }
            }
            ChildValue::Heterogeneous(mut nodes) => {
                nodes.push(node);
                ChildValue::Heterogeneous(nodes)
            }
        }
    }

    /// The sibling nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        match self {
            ChildValue::Single(node) => std::slice::from_ref(node),
            ChildValue::Array(nodes) | ChildValue::Heterogeneous(nodes) => nodes,
        }
    }
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sibling under `key`, applying the merge policy if the key is
    /// already present.
    ///
    /// Lookup is a linear scan over the fields in insertion order, so an
    /// element with n distinct child names costs O(n²) to build.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => {
                let existing =
                    std::mem::replace(&mut field.value, ChildValue::Heterogeneous(Vec::new()));
                field.value = existing.merge(node);
            }
            None => self.fields.push(Field {
                key,
                value: ChildValue::Single(node),
            }),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, node: Node) -> Self {
        self.insert(key, node);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ChildValue> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
