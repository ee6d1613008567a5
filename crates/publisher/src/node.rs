// ABOUTME: The Telegraph content model: a Node is either literal text or a tagged element.
// ABOUTME: Serializes to the createPage wire shape (bare strings and {tag, attrs, children} objects).

//! Structural node model.
//!
//! Telegraph pages are arrays of nodes. A text node encodes as a bare JSON
//! string; an element encodes as an object with `tag`, and optionally `attrs`
//! and `children` (both omitted when empty).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered sequence of top-level nodes for one article.
pub type Document = Vec<Node>;

/// A single content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// A DOM element restricted to the tags and attributes Telegraph accepts.
///
/// An empty `tag` marks an element whose source tag was not allow-listed; it
/// only groups its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute unless the key is already present.
    ///
    /// Returns false when the key was already set. The first value wins so a
    /// later duplicate in the source never replaces an earlier one.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.attrs.contains_key(&key) {
            return false;
        }
        self.attrs.insert(key, value.into());
        true
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// True when the source tag was not allow-listed.
    pub fn is_transparent(&self) -> bool {
        self.tag.is_empty()
    }
}

impl Node {
    /// Create a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// Create an element node with a single text child.
    pub fn element_with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Element(Element::new(tag).with_child(Node::text(text)))
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Returns the text if this node is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            Node::Element(_) => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Render the node back to HTML.
    ///
    /// Transparent elements render only their children.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(s) => escape_into(s, false, out),
            Node::Element(el) => {
                if el.is_transparent() {
                    for child in &el.children {
                        child.write_html(out);
                    }
                    return;
                }
                out.push('<');
                out.push_str(&el.tag);
                for (key, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if is_void(&el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img")
}

fn escape_into(s: &str, in_attr: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Render a sequence of nodes to HTML.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}
