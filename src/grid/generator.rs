//! Shortcode generation for form editors
//!
//! Builds the `[row ...]`/`[col ...]` tags an editor inserts from the values
//! of its row and column dialogs, and wraps the current selection of a text
//! buffer in them.

use crate::grid::ast::Breakpoint;
use std::ops::Range;

/// Row dialog values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTag {
    pub gap: Option<String>,
    pub class: Option<String>,
}

/// Column dialog values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColTag {
    pub col: Option<String>,
    pub sm: Option<String>,
    pub md: Option<String>,
    pub lg: Option<String>,
    pub xl: Option<String>,
    pub class: Option<String>,
}

/// Non-empty, trimmed value of an optional field
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// `key:value`, quoting values that contain whitespace
fn pair(key: &str, value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!(" {}:\"{}\"", key, value.replace('"', ""))
    } else {
        format!(" {}:{}", key, value)
    }
}

pub fn close_tag(name: &str) -> String {
    format!("[/{}]", name)
}

impl RowTag {
    /// The gap the stylesheet falls back to; not written out
    pub const DEFAULT_GAP: &'static str = "16";

    pub fn open_tag(&self, name: &str) -> String {
        let mut tag = format!("[{}", name);
        if let Some(gap) = filled(&self.gap).filter(|gap| *gap != Self::DEFAULT_GAP) {
            tag.push_str(&pair("gap", gap));
        }
        if let Some(class) = filled(&self.class) {
            tag.push_str(&pair("class", class));
        }
        tag.push(']');
        tag
    }

    /// Opening and closing tag with nothing in between
    pub fn snippet(&self, name: &str) -> String {
        format!("{}{}", self.open_tag(name), close_tag(name))
    }
}

impl ColTag {
    pub const DEFAULT_COL: &'static str = "12";

    pub fn breakpoint(&self, breakpoint: Breakpoint) -> Option<&str> {
        let value = match breakpoint {
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => &self.md,
            Breakpoint::Lg => &self.lg,
            Breakpoint::Xl => &self.xl,
        };
        filled(value)
    }

    /// The column width is always written; breakpoints and class only when set
    pub fn open_tag(&self, name: &str) -> String {
        let mut tag = format!("[{}", name);
        tag.push_str(&pair("col", filled(&self.col).unwrap_or(Self::DEFAULT_COL)));
        for breakpoint in Breakpoint::ALL {
            if let Some(value) = self.breakpoint(breakpoint) {
                tag.push_str(&pair(breakpoint.key(), value));
            }
        }
        if let Some(class) = filled(&self.class) {
            tag.push_str(&pair("class", class));
        }
        tag.push(']');
        tag
    }

    pub fn snippet(&self, name: &str) -> String {
        format!("{}{}", self.open_tag(name), close_tag(name))
    }
}

/// Result of inserting a wrapping tag pair into a text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    /// Byte offset of the cursor after insertion
    pub cursor: usize,
}

fn floor_char_boundary(content: &str, index: usize) -> usize {
    let mut index = index.min(content.len());
    while !content.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Wrap the selected range of `content` in `open` and `close`
///
/// With a selection the cursor lands after the closing tag; with an empty
/// selection it lands between the two tags, ready for typing. Offsets past
/// the end or inside a character are moved back to the nearest boundary.
pub fn wrap_selection(content: &str, selection: Range<usize>, open: &str, close: &str) -> Insertion {
    let mut start = floor_char_boundary(content, selection.start);
    let mut end = floor_char_boundary(content, selection.end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let selected = &content[start..end];
    let mut wrapped = String::with_capacity(content.len() + open.len() + close.len());
    wrapped.push_str(&content[..start]);
    wrapped.push_str(open);
    wrapped.push_str(selected);
    wrapped.push_str(close);
    wrapped.push_str(&content[end..]);

    let cursor = if selected.is_empty() {
        start + open.len()
    } else {
        start + open.len() + selected.len() + close.len()
    };
    Insertion {
        content: wrapped,
        cursor,
    }
}
