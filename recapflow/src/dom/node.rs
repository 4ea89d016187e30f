//! Owned HTML node tree.
//!
//! The truncator and the sanitizer both build new trees out of pieces of a
//! parsed document. Parsed `scraper` documents are read-only, so extraction
//! deep-copies the relevant sub-tree into these types first and edits the
//! copy.

use super::words::count_words;

/// Elements that never have an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A node in an owned HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
    /// A comment.
    Comment(String),
}

impl Node {
    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the number of words in all text below this node.
    #[must_use]
    pub fn word_count(&self) -> usize {
        match self {
            Self::Element(element) => element.word_count(),
            Self::Text(text) => count_words(text),
            Self::Comment(_) => 0,
        }
    }

    /// Returns the concatenated text of this node.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Comment(_) => {}
        }
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Serializes the node as markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text(text) if raw_text => out.push_str(text),
            Self::Text(text) => escape_text(text, out),
            Self::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Copies the tag name and attributes without children.
    #[must_use]
    pub fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attrs: self.attrs.clone(),
            children: Vec::new(),
        }
    }

    /// Returns the number of words in all descendant text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.children.iter().map(Node::word_count).sum()
    }

    /// Returns the concatenated descendant text.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Removes every descendant element whose tag is in `names`, along with
    /// its content.
    pub fn remove_descendants(&mut self, names: &[&str]) {
        self.children.retain(|child| match child {
            Node::Element(element) => !names.contains(&element.name.as_str()),
            _ => true,
        });
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.remove_descendants(names);
            }
        }
    }

    /// Returns all descendant elements with the given tag, in document order.
    #[must_use]
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if element.name == name {
                    found.push(element);
                }
                element.collect_named(name, found);
            }
        }
    }

    /// Serializes the element as markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attr(value, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&self.name.as_str());
        for child in &self.children {
            child.write_html(out, raw_text);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// An ordered sequence of sibling nodes with no wrapping element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Returns the nodes in order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Consumes the fragment, returning its nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Returns the number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the fragment has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of words across all nodes.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.nodes.iter().map(Node::word_count).sum()
    }

    /// Returns the concatenated text of all nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.collect_text(&mut out);
        }
        out
    }

    /// Serializes the fragment as markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out, false);
        }
        out
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
