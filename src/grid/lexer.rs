//! Lexer module for shortcode markup
//!
//! This module contains the tokenization logic for form markup,
//! including token definitions and the lexer implementation.
//!
//! The lexer knows nothing about which tag names belong to the grid. It only
//! splits the markup into bracket tags and the text between them, and the
//! parser classifies tags against the configured names. That keeps the logos
//! grammar static while tag names stay configurable.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{attribute_source, tag_name, tokenize, tokenize_with_spans};
pub use tokens::Token;
