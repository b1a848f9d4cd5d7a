//! Owned XML tree for response documents.
//!
//! Bodies are parsed with `roxmltree` and copied into [`Element`]s so documents can be
//! cached, cloned and handed to callers without borrowing the body text.

use std::borrow::Cow;

use crate::core::FmError;

/// Removed before parsing: servers emit this prefix without declaring its namespace.
const OPENSEARCH_PREFIX: &str = "opensearch:";

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One XML element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Local tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All children, text nodes included.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Element children only; whitespace and other text nodes are skipped.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    #[must_use]
    pub fn first_element(&self) -> Option<&Element> {
        self.elements().next()
    }

    /// First element child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Concatenated text of the direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Descendants named `name` in document order, not including `self`.
    #[must_use]
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_named(self, name, &mut out);
        out
    }

    pub(crate) fn into_elements(self) -> impl Iterator<Item = Element> {
        self.children.into_iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    fn from_roxml(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(Node::Element(Element::from_roxml(child)))
                } else if child.is_text() {
                    child.text().map(|t| Node::Text(t.to_string()))
                } else {
                    None
                }
            })
            .collect();
        Element {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }
}

fn collect_named<'a>(el: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    for child in el.elements() {
        if child.name == name {
            out.push(child);
        }
        collect_named(child, name, out);
    }
}

/// A parsed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses a response body.
    ///
    /// Every `opensearch:` substring is removed first. If the body still fails to parse,
    /// code points that XML 1.0 forbids are stripped and parsing is retried once.
    ///
    /// # Errors
    ///
    /// Returns [`FmError::Malformed`] if the repaired body does not parse either.
    pub fn parse(body: &str) -> Result<Self, FmError> {
        let body = body.replace(OPENSEARCH_PREFIX, "");
        if let Ok(doc) = roxmltree::Document::parse(&body) {
            return Ok(Self::from_roxml(&doc));
        }

        let cleaned = strip_invalid_chars(&body);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            stripped = body.chars().count() - cleaned.chars().count(),
            "reparsing response after stripping invalid XML characters"
        );
        let doc = roxmltree::Document::parse(&cleaned)?;
        Ok(Self::from_roxml(&doc))
    }

    fn from_roxml(doc: &roxmltree::Document<'_>) -> Self {
        Self {
            root: Element::from_roxml(doc.root_element()),
        }
    }

    /// The root element, `<lfm>` for service responses.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Descendants of the root named `name`, root included when it matches.
    #[must_use]
    pub fn elements_by_tag(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        if self.root.name == name {
            out.push(&self.root);
        }
        collect_named(&self.root, name, &mut out);
        out
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFD}')
}

/// Drops every code point outside the XML 1.0 `Char` production.
pub(crate) fn strip_invalid_chars(body: &str) -> Cow<'_, str> {
    if body.chars().all(is_xml_char) {
        Cow::Borrowed(body)
    } else {
        Cow::Owned(body.chars().filter(|c| is_xml_char(*c)).collect())
    }
}
