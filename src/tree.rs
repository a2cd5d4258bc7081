use crate::error::{ParseError, ParseFailure};
use std::slice;
use xml::name::OwnedName;
use xml::reader::{ParserConfig2, XmlEvent};

/// A parsed XML document
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parse a raw response body into a tree.  Whitespace-only text is
    /// discarded, other text is trimmed, and comments & processing
    /// instructions are skipped.
    ///
    /// `charset` is the charset given in the response's `Content-Type`, if
    /// any.  When it names an encoding that xml-rs supports, it takes
    /// precedence over the document's XML declaration; otherwise the encoding
    /// is determined from the BOM and the declaration.
    pub fn parse(blob: &[u8], charset: Option<&str>) -> Result<Document, ParseError> {
        let encoding = charset.and_then(|cs| cs.parse::<xml::Encoding>().ok());
        let reader = ParserConfig2::new()
            .ignore_invalid_encoding_declarations(encoding.is_some())
            .override_encoding(encoding)
            .allow_multiple_root_elements(false)
            .trim_whitespace(true)
            .create_reader(blob);
        // Elements that have been opened but not yet closed
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;
        for event in reader {
            use XmlEvent::*;
            match event? {
                StartElement {
                    name, attributes, ..
                } => stack.push(Element {
                    name: literal_name(&name),
                    attributes: attributes
                        .into_iter()
                        .map(|attr| (literal_name(&attr.name), attr.value))
                        .collect(),
                    children: Vec::new(),
                }),
                EndElement { .. } => {
                    // xml-rs guarantees start/end tags are balanced
                    if let Some(elem) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(Node::Element(elem)),
                            None => root = Some(Node::Element(elem)),
                        }
                    }
                }
                CData(s) | Characters(s) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(s);
                    }
                }
                StartDocument { .. }
                | EndDocument
                | Comment(..)
                | Whitespace(..)
                | ProcessingInstruction { .. } => (),
            }
        }
        match root {
            Some(root) => Ok(Document { root }),
            // Unreachable in practice: xml-rs errors out on a document without
            // a root element before EndDocument is emitted.
            None => Err(ParseError::new(vec![ParseFailure {
                row: 1,
                column: 1,
                problem: String::from("no root element found"),
            }])),
        }
    }

    /// The top level of the document as a node list containing just the root
    /// element, suitable for passing to [`first_child_by_tag()`]
    pub fn nodes(&self) -> &[Node] {
        slice::from_ref(&self.root)
    }
}

/// A node in a parsed XML document
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element.  Tag and attribute names are kept exactly as written in
/// the document, namespace prefix included (e.g., `"D:response"`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn push_text(&mut self, s: String) {
        if let Some(Node::Text(prev)) = self.children.last_mut() {
            prev.push_str(&s);
        } else {
            self.children.push(Node::Text(s));
        }
    }
}

fn literal_name(name: &OwnedName) -> String {
    match name.prefix {
        Some(ref prefix) => format!("{prefix}:{}", name.local_name),
        None => name.local_name.clone(),
    }
}

/// Return the children of `node` if it is an element
pub fn children_of(node: &Node) -> Option<&[Node]> {
    match node {
        Node::Element(elem) => Some(&elem.children),
        Node::Text(_) => None,
    }
}

/// Find the first element in `nodes` whose tag name is exactly `tag` and
/// return its children
pub fn first_child_by_tag<'a>(tag: &str, nodes: &'a [Node]) -> Option<&'a [Node]> {
    nodes.iter().find_map(|n| match n {
        Node::Element(elem) if elem.name == tag => Some(elem.children.as_slice()),
        _ => None,
    })
}

/// Return the content of the first text node in `nodes`
pub fn first_text_value(nodes: &[Node]) -> Option<&str> {
    nodes.iter().find_map(|n| match n {
        Node::Text(s) => Some(s.as_str()),
        Node::Element(_) => None,
    })
}
