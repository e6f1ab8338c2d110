//! Parse tree for grid markup
//!
//! A [`Document`] is a flat list of [`Node`]s. Text nodes carry the original
//! markup verbatim (including any tag the parser decided not to claim), while
//! element nodes are matched `row`/`col` pairs with their parsed attributes and
//! nested content.

use crate::grid::parser::attributes::Attributes;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// The two tag kinds the grid recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Row,
    Col,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Row => "row",
            TagKind::Col => "col",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Responsive width overrides, in increasing viewport order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Attribute key, also the suffix of the emitted `data-*` attribute
    pub fn key(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

/// The tag names claimed by the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNames {
    pub row: String,
    pub col: String,
}

impl TagNames {
    pub fn new(row: impl Into<String>, col: impl Into<String>) -> Self {
        TagNames {
            row: row.into(),
            col: col.into(),
        }
    }

    /// Classify a tag name
    pub fn kind_of(&self, name: &str) -> Option<TagKind> {
        if name == self.row {
            Some(TagKind::Row)
        } else if name == self.col {
            Some(TagKind::Col)
        } else {
            None
        }
    }

    /// Configured name for `kind`
    pub fn name_of(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Row => &self.row,
            TagKind::Col => &self.col,
        }
    }
}

impl Default for TagNames {
    fn default() -> Self {
        TagNames::new("row", "col")
    }
}

/// A matched `[name ...]...[/name]` pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: TagKind,
    pub attributes: Attributes,
    pub children: Vec<Node>,
    /// Byte range of the whole element, opening through closing tag
    pub span: Range<usize>,
}

impl Element {
    /// Iterate over the element children of this element
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Nesting depth of elements below and including this node
    pub fn depth(&self) -> usize {
        match self {
            Node::Text(_) => 0,
            Node::Element(element) => {
                1 + element.children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    fn count_elements(&self) -> usize {
        match self {
            Node::Text(_) => 0,
            Node::Element(element) => {
                1 + element
                    .children
                    .iter()
                    .map(Node::count_elements)
                    .sum::<usize>()
            }
        }
    }
}

/// A parsed markup document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    /// Iterate over the top-level elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// Total number of elements at any depth
    pub fn element_count(&self) -> usize {
        self.nodes.iter().map(Node::count_elements).sum()
    }

    /// Deepest element nesting in the document
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// True when the document holds no grid elements at all
    pub fn is_plain(&self) -> bool {
        self.elements().next().is_none()
    }
}
