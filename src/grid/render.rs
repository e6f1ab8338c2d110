//! HTML rendering for grid elements
//!
//! The class names, `data-*` attribute names and the gap custom property are a
//! contract with the companion stylesheet, so they come from [`GridConfig`]
//! and are emitted exactly as configured.
//!
//! Row:
//!
//! ```text
//! <div class="grid-row custom" style="--grid-gap: 16px;">...</div>
//! ```
//!
//! Column:
//!
//! ```text
//! <div class="grid-col" data-col="6" data-md="4">...</div>
//! ```
//!
//! Numeric attributes are coerced but never clamped: `col:99` renders as
//! `data-col="99"`.

use crate::grid::ast::{Breakpoint, Document, Element, Node, TagKind};
use crate::grid::config::GridConfig;
use crate::grid::parser::attributes::Attributes;
use once_cell::sync::Lazy;
use regex::Regex;

static PERCENT_OCTET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[a-fA-F0-9][a-fA-F0-9]").unwrap());

/// Coerce a raw attribute value to a non-negative integer
///
/// Leading whitespace and one sign are skipped, then the leading run of digits
/// is read. The sign is dropped (absolute value), values saturate at
/// `u64::MAX`, and input without leading digits yields 0.
pub fn absint(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Reduce a raw class value to a single safe CSS class token
///
/// Percent-encoded octets are removed first, then every character outside
/// `[A-Za-z0-9_-]`.
pub fn sanitize_class(raw: &str) -> String {
    PERCENT_OCTET_REGEX
        .replace_all(raw, "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

/// Escape a value for use inside a double-quoted HTML attribute
pub fn escape_attr(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Empty in the loose sense form authors expect: missing value or a literal "0"
fn is_blank(raw: &str) -> bool {
    raw.is_empty() || raw == "0"
}

fn class_attribute(base: &str, attributes: &Attributes) -> String {
    let extra = sanitize_class(attributes.get("class").unwrap_or(""));
    if extra.is_empty() {
        escape_attr(base)
    } else {
        escape_attr(&format!("{} {}", base, extra))
    }
}

/// Opening `<div>` of a row
pub fn row_open(attributes: &Attributes, config: &GridConfig) -> String {
    let gap = attributes
        .get("gap")
        .map(absint)
        .unwrap_or(config.default_gap);
    let style = format!("{}: {}px;", config.gap_property, gap);
    format!(
        "<div class=\"{}\" style=\"{}\">",
        class_attribute(&config.row_class, attributes),
        escape_attr(&style)
    )
}

/// Opening `<div>` of a column
///
/// `size` is an alias for `col` and wins when it is set to anything other
/// than blank or the full width.
pub fn col_open(attributes: &Attributes, config: &GridConfig) -> String {
    let width = attributes
        .get("size")
        .filter(|size| !is_blank(size) && *size != "12")
        .or_else(|| attributes.get("col"))
        .map(absint)
        .unwrap_or(config.default_col);

    let mut open = format!(
        "<div class=\"{}\" data-col=\"{}\"",
        class_attribute(&config.col_class, attributes),
        width
    );
    for breakpoint in Breakpoint::ALL {
        if let Some(raw) = attributes.get(breakpoint.key()).filter(|raw| !is_blank(raw)) {
            open.push_str(&format!(" data-{}=\"{}\"", breakpoint.key(), absint(raw)));
        }
    }
    open.push('>');
    open
}

/// Closing markup of an element, with the optional end marker comment
pub fn close(kind: TagKind, config: &GridConfig) -> String {
    if config.closing_comments {
        format!("</div><!-- /{} -->", config.class_for(kind))
    } else {
        "</div>".to_string()
    }
}

/// Opening `<div>` of an element of `kind`
pub fn open(kind: TagKind, attributes: &Attributes, config: &GridConfig) -> String {
    match kind {
        TagKind::Row => row_open(attributes, config),
        TagKind::Col => col_open(attributes, config),
    }
}

/// Wrap an already rendered body in the markup for `kind`
pub fn wrap(kind: TagKind, attributes: &Attributes, body: &str, config: &GridConfig) -> String {
    let open = open(kind, attributes, config);
    let mut html = String::with_capacity(open.len() + body.len() + 32);
    html.push_str(&open);
    html.push_str(body);
    html.push_str(&close(kind, config));
    html
}

/// Render a parsed document to HTML
pub fn render_document(doc: &Document, config: &GridConfig) -> String {
    let mut output = String::new();
    render_nodes(&doc.nodes, config, &mut output);
    output
}

fn render_nodes(nodes: &[Node], config: &GridConfig, output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Element(element) => render_element(element, config, output),
        }
    }
}

fn render_element(element: &Element, config: &GridConfig, output: &mut String) {
    output.push_str(&open(element.kind, &element.attributes, config));
    render_nodes(&element.children, config, output);
    output.push_str(&close(element.kind, config));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(source: &str) -> Attributes {
        Attributes::parse(source)
    }

    #[test]
    fn test_absint() {
        assert_eq!(absint("16"), 16);
        assert_eq!(absint("  7"), 7);
        assert_eq!(absint("12px"), 12);
        assert_eq!(absint("-5"), 5);
        assert_eq!(absint("+3"), 3);
        assert_eq!(absint(""), 0);
        assert_eq!(absint("abc"), 0);
        assert_eq!(absint("--5"), 0);
        assert_eq!(absint("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_sanitize_class() {
        assert_eq!(sanitize_class("custom"), "custom");
        assert_eq!(sanitize_class("my-class_2"), "my-class_2");
        assert_eq!(sanitize_class("a b"), "ab");
        assert_eq!(sanitize_class("x\"><script>"), "xscript");
        assert_eq!(sanitize_class("wide%20left"), "wideleft");
        assert_eq!(sanitize_class("ünï"), "n");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#039;");
        assert_eq!(escape_attr("--grid-gap: 4px;"), "--grid-gap: 4px;");
    }

    #[test]
    fn test_row_defaults() {
        let config = GridConfig::default();
        assert_eq!(
            row_open(&attrs(""), &config),
            r#"<div class="grid-row" style="--grid-gap: 16px;">"#
        );
    }

    #[test]
    fn test_row_with_gap_and_class() {
        let config = GridConfig::default();
        assert_eq!(
            row_open(&attrs("gap:40 class:custom"), &config),
            r#"<div class="grid-row custom" style="--grid-gap: 40px;">"#
        );
    }

    #[test]
    fn test_row_with_non_numeric_gap() {
        let config = GridConfig::default();
        assert_eq!(
            row_open(&attrs("gap:wide"), &config),
            r#"<div class="grid-row" style="--grid-gap: 0px;">"#
        );
    }

    #[test]
    fn test_col_defaults() {
        let config = GridConfig::default();
        assert_eq!(
            col_open(&attrs(""), &config),
            r#"<div class="grid-col" data-col="12">"#
        );
    }

    #[test]
    fn test_col_breakpoints_in_fixed_order() {
        let config = GridConfig::default();
        assert_eq!(
            col_open(&attrs("xl:3 col:8 sm:12 md:6 class:field"), &config),
            r#"<div class="grid-col field" data-col="8" data-sm="12" data-md="6" data-xl="3">"#
        );
    }

    #[test]
    fn test_col_blank_breakpoints_are_omitted() {
        let config = GridConfig::default();
        assert_eq!(
            col_open(&attrs("col:6 sm md:0 lg:x"), &config),
            r#"<div class="grid-col" data-col="6" data-lg="0">"#
        );
    }

    #[test]
    fn test_col_values_are_not_clamped() {
        let config = GridConfig::default();
        assert_eq!(
            col_open(&attrs("col:99 sm:0 md:40"), &config),
            r#"<div class="grid-col" data-col="99" data-md="40">"#
        );
    }

    #[test]
    fn test_col_size_alias() {
        let config = GridConfig::default();
        assert!(col_open(&attrs("size:4"), &config).contains(r#"data-col="4""#));
        assert!(col_open(&attrs("size:4 col:8"), &config).contains(r#"data-col="4""#));
        assert!(col_open(&attrs("size:12 col:8"), &config).contains(r#"data-col="8""#));
        assert!(col_open(&attrs("size:0 col:8"), &config).contains(r#"data-col="8""#));
    }

    #[test]
    fn test_close_with_comments() {
        let mut config = GridConfig::default();
        assert_eq!(close(TagKind::Row, &config), "</div>");
        config.closing_comments = true;
        assert_eq!(close(TagKind::Row, &config), "</div><!-- /grid-row -->");
        assert_eq!(close(TagKind::Col, &config), "</div><!-- /grid-col -->");
    }

    #[test]
    fn test_open_dispatches_by_kind() {
        let config = GridConfig::default();
        let attributes = attrs("gap:4 col:6");
        assert_eq!(open(TagKind::Row, &attributes, &config), row_open(&attributes, &config));
        assert_eq!(open(TagKind::Col, &attributes, &config), col_open(&attributes, &config));
    }

    #[test]
    fn test_wrap() {
        let config = GridConfig::default();
        assert_eq!(
            wrap(TagKind::Col, &attrs("col:6"), "A", &config),
            r#"<div class="grid-col" data-col="6">A</div>"#
        );
    }
}
