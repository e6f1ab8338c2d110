//! Testing utilities for document assertions
//!
//! Parser tests should assert on the whole shape of a document, not on node
//! counts alone. [`assert_doc`] offers a fluent API whose nesting mirrors the
//! tree, so a test reads like the markup it parses:
//!
//! ```rust,ignore
//! use lean_grid::grid::testing::assert_doc;
//!
//! assert_doc(&doc).node_count(1).element(0, |row| {
//!     row.kind(TagKind::Row)
//!         .attribute("gap", "8")
//!         .child_count(2)
//!         .child_element(0, |col| {
//!             col.kind(TagKind::Col).attribute("col", "6").text("Name");
//!         })
//!         .child_text(1, "\n");
//! });
//! ```
//!
//! Failures name the path to the node that did not match, e.g.
//! `nodes[0].children[1]: Expected text "A", found "B"`.

mod testing_assertions;

pub use testing_assertions::{assert_doc, DocumentAssertion, ElementAssertion};
