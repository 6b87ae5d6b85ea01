//! Owned element tree standing in for the browser DOM.
//!
//! Renderers build `Element` trees and hand them to the host; the host can
//! serialize them with [`Element::inner_html`]/[`Element::outer_html`] or walk
//! them directly. Serialization follows the HTML fragment serialization rules
//! a browser applies to `innerHTML`: void elements get no end tag, text inside
//! raw-text elements (`script`, `style`, ...) is written verbatim, and
//! attribute values escape only what would break the double-quoted form.

use crate::RenderError;
use crate::fragment::parse_fragment;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A run of (decoded) text.
    Text(String),
    /// A comment, without its `<!--`/`-->` markers.
    Comment(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants. Comments contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::Comment(_) => {}
        }
    }

    fn serialize(&self, parent_tag: Option<&str>, out: &mut String) {
        match self {
            Node::Element(el) => el.serialize(out),
            Node::Text(text) => {
                let raw = parent_tag.is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag));
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&html_escape::encode_text(text));
                }
            }
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element: tag name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element, validating the tag name the way `createElement` does.
    ///
    /// ASCII tag names are lowercased.
    ///
    /// ```
    /// use rendermime_core::Element;
    ///
    /// let el = Element::new("DIV").unwrap();
    /// assert_eq!(el.tag_name(), "div");
    /// assert!(Element::new("not a tag").is_err());
    /// ```
    pub fn new(tag: &str) -> Result<Self, RenderError> {
        if !is_valid_tag_name(tag) {
            return Err(RenderError::creation(tag));
        }
        Ok(Self::unchecked(tag.to_ascii_lowercase()))
    }

    /// An empty `div`, the container every widget starts from.
    pub fn div() -> Self {
        Self::unchecked("div")
    }

    /// Creates an element without validating the tag (used by the fragment parser).
    pub(crate) fn unchecked(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends an attribute as written, without lowercasing or deduplicating.
    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push((name, value));
    }

    /// Consumes the element, returning its children.
    pub(crate) fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// The element's tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Returns true for elements that cannot have children.
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Sets an attribute, keeping its original position when it already exists.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_ascii_lowercase(), value)),
        }
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let idx = self
            .attributes
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(idx).1)
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in order, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The first child node that is an element.
    pub fn first_element_child(&self) -> Option<&Element> {
        self.child_elements().next()
    }

    /// Appends a node after the existing children.
    pub fn append_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Appends several nodes in order.
    pub fn append_children(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.extend(nodes);
    }

    /// Replaces all children with a single text node (none for empty text).
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Replaces all children with the nodes parsed from an HTML fragment.
    pub fn set_inner_html(&mut self, html: &str) -> Result<(), RenderError> {
        self.children = parse_fragment(html)?;
        Ok(())
    }

    /// Serialized children.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.serialize(Some(&self.tag), &mut out);
        }
        out
    }

    /// Serialized element, including its own tags.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.serialize(&mut out);
        out
    }

    /// Descendant elements with the given tag name, in document order.
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.tag.eq_ignore_ascii_case(tag) {
                found.push(child);
            }
            child.collect_by_tag(tag, found);
        }
    }

    /// Visits every descendant element mutably, parents before children.
    pub fn visit_elements_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                visit(el);
                el.visit_elements_mut(visit);
            }
        }
    }

    fn serialize(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.serialize(Some(&self.tag), out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escapes an attribute value for double-quoted output: `&` and `"` only.
fn escape_attribute(value: &str) -> String {
    if !value.contains(['&', '"']) {
        return value.to_string();
    }
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Checks a tag name against the rules `createElement` enforces.
///
/// The first character must be an ASCII letter, `_` or `:`; the rest may be
/// ASCII alphanumerics, `-`, `.`, `_`, `:` or any non-ASCII character.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == ':' || !first.is_ascii()) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':') || !c.is_ascii())
}
