//! Removal of auto-paragraph debris around grid markup
//!
//! Form plugins commonly run an auto-paragraph filter over form markup, which
//! wraps the generated `<div>`s in `<p>` and sprinkles `<br>` after line
//! breaks. Inside a grid those break the layout, so this pass strips them
//! where they sit directly against a grid opening tag or a closing marker.
//!
//! Only unadorned opening tags (`<div class="grid-row"` with no extra class)
//! are recognized, and closings are found through the `<!-- /grid-row -->`
//! markers, which is why cleanup requires `closing_comments`.

use crate::grid::config::GridConfig;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct AutopCleanup {
    rules: Vec<(Regex, &'static str)>,
}

impl AutopCleanup {
    pub fn new(config: &GridConfig) -> Result<Self, regex::Error> {
        let row = regex::escape(&config.row_class);
        let col = regex::escape(&config.col_class);

        let patterns = [
            // Paragraph wrappers around grid tags
            (
                format!(r#"(<p>\s*)?(<div class="{row}"[^>]*>)(\s*</p>)?"#),
                "${2}",
            ),
            (
                format!(r"(<p>\s*)?(</div>\s*<!-- /{row} -->)(\s*</p>)?"),
                "${2}",
            ),
            (
                format!(r#"(<p>\s*)?(<div class="{col}"[^>]*>)(\s*<br\s*/?>)?"#),
                "${2}",
            ),
            (
                format!(r"(<br\s*/?>)?(\s*</div>\s*<!-- /{col} -->)(\s*</p>)?"),
                "${2}",
            ),
            // Line breaks directly inside grid tags
            (
                format!(r#"(<div class="{row}"[^>]*>)\s*<br\s*/?>\s*"#),
                "${1}",
            ),
            (
                format!(r"\s*<br\s*/?>\s*(</div>\s*<!-- /{row} -->)"),
                "${1}",
            ),
            (
                format!(r#"(<div class="{col}"[^>]*>)\s*<br\s*/?>\s*"#),
                "${1}",
            ),
            (
                format!(r"\s*<br\s*/?>\s*(</div>\s*<!-- /{col} -->)"),
                "${1}",
            ),
        ];

        let mut rules = Vec::with_capacity(patterns.len());
        for (pattern, replacement) in patterns {
            rules.push((Regex::new(&pattern)?, replacement));
        }
        Ok(AutopCleanup { rules })
    }

    pub fn apply(&self, content: &str) -> String {
        let mut output = content.to_string();
        for (pattern, replacement) in &self.rules {
            output = pattern.replace_all(&output, *replacement).into_owned();
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup() -> AutopCleanup {
        let mut config = GridConfig::default();
        config.closing_comments = true;
        config.autop_cleanup = true;
        AutopCleanup::new(&config).unwrap()
    }

    #[test]
    fn test_strips_paragraph_around_row() {
        let input = concat!(
            r#"<p><div class="grid-row" style="--grid-gap: 16px;"></p>"#,
            "<p></div><!-- /grid-row --></p>"
        );
        assert_eq!(
            cleanup().apply(input),
            r#"<div class="grid-row" style="--grid-gap: 16px;"></div><!-- /grid-row -->"#
        );
    }

    #[test]
    fn test_strips_breaks_inside_column() {
        let input = concat!(
            r#"<div class="grid-col" data-col="6"><br />"#,
            "\nName<br />\n</div><!-- /grid-col -->"
        );
        assert_eq!(
            cleanup().apply(input),
            concat!(
                r#"<div class="grid-col" data-col="6">"#,
                "\nName\n</div><!-- /grid-col -->"
            )
        );
    }

    #[test]
    fn test_leaves_unrelated_markup_alone() {
        let input = "<p>Intro<br />\ntext</p><div class=\"other\"><br></div>";
        assert_eq!(cleanup().apply(input), input);
    }

    #[test]
    fn test_uses_configured_class_names() {
        let config = GridConfig::lean_forms();
        let cleanup = AutopCleanup::new(&config).unwrap();
        assert_eq!(
            cleanup.apply("<p><div class=\"lf-row\"></p>"),
            "<div class=\"lf-row\">"
        );
    }
}
