//! Fluent assertion API for document nodes

use crate::grid::ast::{Document, Element, Node, TagKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level nodes
    pub fn node_count(self, expected: usize) -> Self {
        assert_node_count(&self.doc.nodes, expected, "document");
        self
    }

    /// Assert the top-level node at `index` is text equal to `expected`
    pub fn text(self, index: usize, expected: &str) -> Self {
        assert_text_node(&self.doc.nodes, index, expected, "nodes");
        self
    }

    /// Assert on the top-level element at `index`
    pub fn element<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let context = format!("nodes[{}]", index);
        let element = expect_element(&self.doc.nodes, index, &context);
        assertion(ElementAssertion { element, context });
        self
    }
}

// ============================================================================
// Element Assertions
// ============================================================================

pub struct ElementAssertion<'a> {
    element: &'a Element,
    context: String,
}

impl<'a> ElementAssertion<'a> {
    pub fn kind(self, expected: TagKind) -> Self {
        assert_eq!(
            self.element.kind, expected,
            "{}: Expected {} element, found {}",
            self.context, expected, self.element.kind
        );
        self
    }

    /// Assert an attribute is present with the given value
    pub fn attribute(self, key: &str, expected: &str) -> Self {
        match self.element.attributes.get(key) {
            Some(actual) => assert_eq!(
                actual, expected,
                "{}: Expected attribute {}={:?}, found {:?}",
                self.context, key, expected, actual
            ),
            None => panic!(
                "{}: Expected attribute {}={:?}, element has [{}]",
                self.context,
                key,
                expected,
                self.element
                    .attributes
                    .iter()
                    .map(|(key, value)| format!("{}={:?}", key, value))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_node_count(&self.element.children, expected, &self.context);
        self
    }

    /// Assert on the child element at `index`
    pub fn child_element<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let context = format!("{}.children[{}]", self.context, index);
        let element = expect_element(&self.element.children, index, &context);
        assertion(ElementAssertion { element, context });
        self
    }

    /// Assert the child at `index` is text equal to `expected`
    pub fn child_text(self, index: usize, expected: &str) -> Self {
        let context = format!("{}.children", self.context);
        assert_text_node(&self.element.children, index, expected, &context);
        self
    }

    /// Assert the concatenated direct text children
    pub fn text(self, expected: &str) -> Self {
        let actual = self.element.text();
        assert_eq!(
            actual, expected,
            "{}: Expected text {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn assert_node_count(nodes: &[Node], expected: usize, context: &str) {
    assert_eq!(
        nodes.len(),
        expected,
        "{}: Expected {} nodes, found {}: [{}]",
        context,
        expected,
        nodes.len(),
        summarize_nodes(nodes)
    );
}

fn assert_text_node(nodes: &[Node], index: usize, expected: &str, context: &str) {
    let node = expect_node(nodes, index, context);
    match node {
        Node::Text(actual) => assert_eq!(
            actual, expected,
            "{}[{}]: Expected text {:?}, found {:?}",
            context, index, expected, actual
        ),
        Node::Element(element) => panic!(
            "{}[{}]: Expected text {:?}, found {} element",
            context, index, expected, element.kind
        ),
    }
}

fn expect_node<'a>(nodes: &'a [Node], index: usize, context: &str) -> &'a Node {
    assert!(
        index < nodes.len(),
        "{}: Index {} out of bounds ({} nodes: [{}])",
        context,
        index,
        nodes.len(),
        summarize_nodes(nodes)
    );
    &nodes[index]
}

fn expect_element<'a>(nodes: &'a [Node], index: usize, context: &str) -> &'a Element {
    match expect_node(nodes, index, context) {
        Node::Element(element) => element,
        Node::Text(text) => panic!("{}: Expected element, found text {:?}", context, text),
    }
}

fn summarize_nodes(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) if text.chars().count() > 20 => {
                format!("Text({:?}...)", text.chars().take(20).collect::<String>())
            }
            Node::Text(text) => format!("Text({:?})", text),
            Node::Element(element) => format!("{}({})", element.kind, element.children.len()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
