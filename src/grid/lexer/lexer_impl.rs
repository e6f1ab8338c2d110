//! Implementation of the shortcode lexer
//!
//! This module provides convenience functions for tokenizing form markup and
//! for taking tag slices apart. The actual tokenization is handled entirely by
//! logos.

use crate::grid::lexer::tokens::{is_tag_space, Token};
use logos::Logos;

/// Convenience function to tokenize a string and collect all tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with_spans(source)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Convenience function to tokenize a string and collect tokens with their spans
///
/// The spans are contiguous and cover the whole source. logos commits to the
/// longest candidate at a `[`, so a tag-like run with no closing `]` (e.g.
/// `[row gap:4` at end of input) comes back as an error instead of falling
/// back to a lone bracket. That `[` is emitted as [`Token::Bracket`] and
/// lexing restarts on the byte after it.
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    'restart: while offset < source.len() {
        let mut lexer = Token::lexer(&source[offset..]);
        while let Some(result) = lexer.next() {
            let span = offset + lexer.span().start..offset + lexer.span().end;
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(_) => {
                    let start = span.start;
                    let (token, width) = match source[start..].chars().next() {
                        Some('[') | None => (Token::Bracket, 1),
                        Some(c) => (Token::Text, c.len_utf8()),
                    };
                    tokens.push((token, start..start + width));
                    offset = start + width;
                    continue 'restart;
                }
            }
        }
        break;
    }

    tokens
}

/// Strip the brackets (and the slash of a closing tag) from a tag slice
fn tag_body(tag: &str) -> &str {
    let inner = tag.strip_prefix('[').unwrap_or(tag);
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    inner.strip_suffix(']').unwrap_or(inner)
}

/// Extract the tag name from an opening or closing tag slice
///
/// `"[col col:6]"` and `"[/col]"` both yield `"col"`.
pub fn tag_name(tag: &str) -> &str {
    let body = tag_body(tag);
    let end = body.find(is_tag_space).unwrap_or(body.len());
    &body[..end]
}

/// Extract the raw attribute substring of an opening tag slice, trimmed
///
/// `"[col col:6 sm:12]"` yields `"col:6 sm:12"`; a tag without attributes
/// yields an empty string.
pub fn attribute_source(tag: &str) -> &str {
    let body = tag_body(tag);
    match body.find(is_tag_space) {
        Some(end) => body[end..].trim(),
        None => "",
    }
}
