//! Token definitions for shortcode markup
//!
//! Form markup is mostly opaque text. The only structure the lexer cares about
//! is bracket tags: `[name attrs...]` opening tags and `[/name]` closing tags.
//! Everything else, including field tags the form plugin itself understands
//! (`[text* your-name]`), is either an opening tag with a name we don't claim
//! or plain text. The parser decides which tags belong to the grid.
//!
//! The token set is lossless: every byte of the input belongs to exactly one
//! token, so concatenating the token slices reproduces the source.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All possible tokens in shortcode markup
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Token {
    // `[/name]`
    #[regex(r"\[/[A-Za-z0-9_-]+\]")]
    CloseTag,

    // `[name]` or `[name attrs...]`; the name must be followed by whitespace or `]`
    #[regex(r"\[[A-Za-z0-9_-]+\]")]
    #[regex(r"\[[A-Za-z0-9_-]+[ \t\r\n][^\[\]]*\]")]
    OpenTag,

    // A `[` that doesn't start a complete tag
    #[token("[")]
    Bracket,

    // Text content (catch-all for everything up to the next bracket)
    #[regex(r"[^\[]+")]
    Text,
}

impl Token {
    /// Check if this token is an opening or closing tag
    pub fn is_tag(&self) -> bool {
        matches!(self, Token::OpenTag | Token::CloseTag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::OpenTag => "OPEN_TAG",
            Token::CloseTag => "CLOSE_TAG",
            Token::Bracket => "BRACKET",
            Token::Text => "TEXT",
        };
        write!(f, "{}", name)
    }
}

/// Whitespace that may separate a tag name from its attributes
pub(crate) fn is_tag_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
