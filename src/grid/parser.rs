//! Tree parser for grid markup
//!
//! Parsing runs in two passes over the token stream:
//!
//! 1. Pairing. Opening grid tags go on a stack. A closing tag pairs with the
//!    nearest open tag of the same kind; any opens stacked above it can no
//!    longer close properly and are abandoned. A closing tag with no open
//!    partner is stray. Abandoned opens, stray closes and opens still on the
//!    stack at the end of input stay in the output as literal text.
//! 2. Tree building. A recursive descent over the paired tokens produces
//!    [`Node`]s. Elements nested deeper than `max_depth` are not descended
//!    into; their whole source slice is kept as literal text.
//!
//! Because pairs come from a stack they always nest properly, so nested
//! same-name tags match by depth rather than by textual proximity.

pub mod attributes;

use crate::grid::ast::{Document, Element, Node, TagKind, TagNames};
use crate::grid::lexer::{attribute_source, tag_name, tokenize_with_spans, Token};
use attributes::Attributes;
use std::ops::Range;

/// A token with its grid classification
#[derive(Debug, Clone)]
struct Classified {
    token: Token,
    span: Range<usize>,
    kind: Option<TagKind>,
}

/// Parse markup into a document tree
pub fn parse(source: &str, names: &TagNames, max_depth: usize) -> Document {
    let tokens = classify(source, names);
    let partners = pair_tags(source, &tokens);
    let builder = TreeBuilder {
        source,
        tokens: &tokens,
        partners: &partners,
        max_depth,
    };
    Document::new(builder.build(0..tokens.len(), 1))
}

fn classify(source: &str, names: &TagNames) -> Vec<Classified> {
    tokenize_with_spans(source)
        .into_iter()
        .map(|(token, span)| {
            let kind = if token.is_tag() {
                names.kind_of(tag_name(&source[span.clone()]))
            } else {
                None
            };
            Classified { token, span, kind }
        })
        .collect()
}

/// Stack slot for per-kind bookkeeping
fn slot(kind: TagKind) -> usize {
    match kind {
        TagKind::Row => 0,
        TagKind::Col => 1,
    }
}

/// For every opening grid tag that has a partner, the index of its closing tag
///
/// A per-kind count of the opens on the stack rejects a stray close without
/// scanning. When a partner exists the scan stops at it and everything above
/// is truncated, so the pass stays linear.
fn pair_tags(source: &str, tokens: &[Classified]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut open: Vec<(usize, TagKind)> = Vec::new();
    let mut open_count = [0usize; 2];

    for (index, classified) in tokens.iter().enumerate() {
        let Some(kind) = classified.kind else {
            continue;
        };
        match classified.token {
            Token::OpenTag => {
                open.push((index, kind));
                open_count[slot(kind)] += 1;
            }
            Token::CloseTag if open_count[slot(kind)] == 0 => {
                tracing::debug!(
                    kind = %kind,
                    tag = &source[classified.span.clone()],
                    offset = classified.span.start,
                    "stray closing tag left as text"
                );
            }
            Token::CloseTag => {
                let Some(position) = open.iter().rposition(|(_, open_kind)| *open_kind == kind)
                else {
                    continue;
                };
                for (abandoned, abandoned_kind) in &open[position + 1..] {
                    open_count[slot(*abandoned_kind)] -= 1;
                    tracing::debug!(
                        kind = %abandoned_kind,
                        offset = tokens[*abandoned].span.start,
                        "unclosed grid tag left as text"
                    );
                }
                open_count[slot(kind)] -= 1;
                partners[open[position].0] = Some(index);
                open.truncate(position);
            }
            _ => {}
        }
    }

    for (index, kind) in open {
        tracing::debug!(
            kind = %kind,
            offset = tokens[index].span.start,
            "unclosed grid tag left as text"
        );
    }

    partners
}

struct TreeBuilder<'a> {
    source: &'a str,
    tokens: &'a [Classified],
    partners: &'a [Option<usize>],
    max_depth: usize,
}

impl TreeBuilder<'_> {
    fn build(&self, range: Range<usize>, depth: usize) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        let mut index = range.start;

        while index < range.end {
            let classified = &self.tokens[index];
            let partner = match (classified.token, classified.kind) {
                (Token::OpenTag, Some(kind)) => self.partners[index]
                    .filter(|close| *close < range.end)
                    .map(|close| (kind, close)),
                _ => None,
            };

            let Some((kind, close)) = partner else {
                text.push_str(&self.source[classified.span.clone()]);
                index += 1;
                continue;
            };

            let span = classified.span.start..self.tokens[close].span.end;
            if depth > self.max_depth {
                tracing::debug!(
                    kind = %kind,
                    offset = span.start,
                    max_depth = self.max_depth,
                    "nesting limit reached, element left as text"
                );
                text.push_str(&self.source[span]);
            } else {
                if !text.is_empty() {
                    nodes.push(Node::Text(std::mem::take(&mut text)));
                }
                let open_tag = &self.source[classified.span.clone()];
                nodes.push(Node::Element(Element {
                    kind,
                    attributes: Attributes::parse(attribute_source(open_tag)),
                    children: self.build(index + 1..close, depth + 1),
                    span,
                }));
            }
            index = close + 1;
        }

        if !text.is_empty() {
            nodes.push(Node::Text(text));
        }
        nodes
    }
}
