//! First-closing-tag matching, as the Lean Forms plugin shipped it
//!
//! Each pass is a non-greedy regex replacement: an opening tag pairs with the
//! first closing tag of the same name after it, whatever lies in between. All
//! rows are rewritten first, then all columns, and every matched body is run
//! through both passes again before it is wrapped.
//!
//! This mismatches nested same-name tags: in
//! `[row][row]x[/row]y[/row]` the outer opening tag pairs with the inner
//! closing tag. Forms written against the plugin may depend on that, which is
//! the only reason this matcher exists.

use crate::grid::ast::{TagKind, TagNames};
use crate::grid::config::GridConfig;
use crate::grid::parser::attributes::Attributes;
use crate::grid::render;
use regex::{Captures, Regex};

#[derive(Debug, Clone)]
pub struct LegacyMatcher {
    row: Regex,
    col: Regex,
}

impl LegacyMatcher {
    pub fn new(names: &TagNames) -> Result<Self, regex::Error> {
        Ok(LegacyMatcher {
            row: shortcode_pattern(names.name_of(TagKind::Row))?,
            col: shortcode_pattern(names.name_of(TagKind::Col))?,
        })
    }

    /// Run the row pass then the column pass over `content`
    ///
    /// `depth` counts the enclosing matched bodies; past `max_depth` the
    /// content is returned untouched.
    pub fn process(&self, content: &str, config: &GridConfig, depth: usize) -> String {
        if depth > config.max_depth {
            tracing::debug!(
                max_depth = config.max_depth,
                "nesting limit reached, body left as text"
            );
            return content.to_string();
        }

        let rows = self.row.replace_all(content, |captures: &Captures<'_>| {
            self.expand(TagKind::Row, captures, config, depth)
        });
        let cols = self.col.replace_all(&rows, |captures: &Captures<'_>| {
            self.expand(TagKind::Col, captures, config, depth)
        });
        cols.into_owned()
    }

    fn expand(
        &self,
        kind: TagKind,
        captures: &Captures<'_>,
        config: &GridConfig,
        depth: usize,
    ) -> String {
        let attributes = Attributes::parse(captures[1].trim());
        let body = self.process(&captures[2], config, depth + 1);
        render::wrap(kind, &attributes, &body, config)
    }
}

/// `[name attrs]body[/name]`, body matched lazily across lines
///
/// The name is not required to end at a word boundary, so `[rowx]` opens a
/// `row` with attribute text `x`.
fn shortcode_pattern(name: &str) -> Result<Regex, regex::Error> {
    let name = regex::escape(name);
    Regex::new(&format!(r"(?s)\[{name}([^\]]*)\](.*?)\[/{name}\]"))
}
