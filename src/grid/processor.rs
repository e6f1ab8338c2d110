//! File processing API for grid markup
//!
//! Processes markup into one of several output formats, each naming the stage
//! it stops at: the token stream (`token-*`), the parsed tree (`ast-*`) or the
//! final rendered markup (`html`). The intermediate stages exist for
//! debugging forms whose output is not what the author expected.

use crate::grid::config::ConfigError;
use crate::grid::formats::serialize_ast_tag;
use crate::grid::lexer::{tokenize_with_spans, Token};
use crate::grid::transform::Transformer;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    TokenSimple,
    TokenJson,
    AstTag,
    AstJson,
    AstYaml,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::TokenSimple,
        OutputFormat::TokenJson,
        OutputFormat::AstTag,
        OutputFormat::AstJson,
        OutputFormat::AstYaml,
        OutputFormat::Html,
    ];

    /// Parse a format string like "token-simple" or "ast-tag"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == format_str)
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::TokenSimple => "token-simple",
            OutputFormat::TokenJson => "token-json",
            OutputFormat::AstTag => "ast-tag",
            OutputFormat::AstJson => "ast-json",
            OutputFormat::AstYaml => "ast-yaml",
            OutputFormat::Html => "html",
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid format: {0} (available: {formats})", formats = available_formats().join(", "))]
    InvalidFormat(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A token with the slice of source it covers
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    token: Token,
    text: &'a str,
    start: usize,
    end: usize,
}

/// Process markup according to the given format
pub fn process_str(
    source: &str,
    format: OutputFormat,
    transformer: &Transformer,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::TokenSimple => Ok(format_tokens_simple(source)),
        OutputFormat::TokenJson => serde_json::to_string_pretty(&token_records(source))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::AstTag => Ok(serialize_ast_tag(&transformer.parse(source))),
        OutputFormat::AstJson => serde_json::to_string_pretty(&transformer.parse(source))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::AstYaml => serde_yaml::to_string(&transformer.parse(source))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Html => Ok(transformer.transform(source)),
    }
}

/// Process a markup file according to the given format
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    format: OutputFormat,
    transformer: &Transformer,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| ProcessingError::Io {
        path: file_path.display().to_string(),
        source,
    })?;
    process_str(&content, format, transformer)
}

fn token_records(source: &str) -> Vec<TokenRecord<'_>> {
    tokenize_with_spans(source)
        .into_iter()
        .map(|(token, span)| TokenRecord {
            token,
            text: &source[span.clone()],
            start: span.start,
            end: span.end,
        })
        .collect()
}

/// One token per line: its name, then the covered text in debug quoting
fn format_tokens_simple(source: &str) -> String {
    let mut result = String::new();
    for record in token_records(source) {
        result.push_str(&format!("{} {:?}\n", record.token, record.text));
    }
    result
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    OutputFormat::ALL
        .iter()
        .map(|format| format.as_str().to_string())
        .collect()
}
