//! XML-like AST tag serialization
//!
//! Serializes a parsed document to an indented, XML-like dump that mirrors the
//! tree: one tag per element named after its kind, attributes in source
//! order, and text nodes as `<text>` leaves.
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <row gap="8">
//!     <col col="6">
//!       <text>Name</text>
//!     </col>
//!   </row>
//! </document>
//! ```

use crate::grid::ast::{Document, Element, Node};

/// Serialize a document to AST tag format
pub fn serialize_document(doc: &Document) -> String {
    let mut result = String::new();
    result.push_str("<document>\n");
    for node in &doc.nodes {
        serialize_node(node, 1, &mut result);
    }
    result.push_str("</document>");
    result
}

/// Serialize a node (recursive)
fn serialize_node(node: &Node, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);

    match node {
        Node::Text(text) => {
            output.push_str(&format!("{}<text>{}</text>\n", indent, escape_xml(text)));
        }
        Node::Element(element) => {
            output.push_str(&format!("{}<{}", indent, element.kind));
            output.push_str(&serialize_attributes(element));
            if element.children.is_empty() {
                output.push_str(&format!("></{}>\n", element.kind));
            } else {
                output.push_str(">\n");
                for child in &element.children {
                    serialize_node(child, indent_level + 1, output);
                }
                output.push_str(&format!("{}</{}>\n", indent, element.kind));
            }
        }
    }
}

fn serialize_attributes(element: &Element) -> String {
    element
        .attributes
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape_xml(value)))
        .collect()
}

/// Escape XML special characters; newlines are made visible so every node stays on one line
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "\\n")
}
