//! The grid shortcode transformer
//!
//! [`Transformer::transform`] rewrites every matched `[row]`/`[col]` pair in a
//! form's markup into the `<div>` structure the grid stylesheet expects and
//! leaves everything else byte-for-byte as it was. It is total: malformed
//! attributes are skipped, unmatched tags stay as literal text and nesting
//! beyond the configured depth is left untransformed.
//!
//! ```rust,ignore
//! use lean_grid::transform;
//!
//! let html = transform("[row gap:8][col col:6]A[/col][/row]");
//! ```
//!
//! A transformer holds only immutable configuration and compiled patterns, so
//! one instance can serve any number of concurrent renders.

pub mod legacy;

use crate::grid::ast::{Document, TagNames};
use crate::grid::cleanup::AutopCleanup;
use crate::grid::config::{ConfigError, GridConfig, MatchingMode};
use crate::grid::features::FormFilter;
use crate::grid::parser;
use crate::grid::render::render_document;
use legacy::LegacyMatcher;
use once_cell::sync::Lazy;

static DEFAULT_TRANSFORMER: Lazy<Transformer> = Lazy::new(Transformer::default);

/// Transform markup with the default configuration
pub fn transform(markup: &str) -> String {
    DEFAULT_TRANSFORMER.transform(markup)
}

#[derive(Debug, Clone)]
pub struct Transformer {
    config: GridConfig,
    names: TagNames,
    legacy: Option<LegacyMatcher>,
    cleanup: Option<AutopCleanup>,
}

impl Transformer {
    /// Validate the configuration and compile what it needs
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let names = config.tag_names();
        let legacy = match config.matching {
            MatchingMode::Legacy => Some(LegacyMatcher::new(&names)?),
            MatchingMode::Balanced => None,
        };
        let cleanup = if config.autop_cleanup {
            Some(AutopCleanup::new(&config)?)
        } else {
            None
        };
        Ok(Transformer {
            config,
            names,
            legacy,
            cleanup,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Parse markup into a tree using this transformer's tag names and depth limit
    pub fn parse(&self, markup: &str) -> Document {
        parser::parse(markup, &self.names, self.config.max_depth)
    }

    /// Rewrite grid shortcodes in `markup` into HTML
    pub fn transform(&self, markup: &str) -> String {
        let _span = tracing::trace_span!(
            "grid_transform",
            bytes = markup.len(),
            matching = ?self.config.matching
        )
        .entered();

        let output = if !markup.contains('[') {
            markup.to_string()
        } else {
            match &self.legacy {
                Some(matcher) => matcher.process(markup, &self.config, 1),
                None => render_document(&self.parse(markup), &self.config),
            }
        };

        match &self.cleanup {
            Some(cleanup) => cleanup.apply(&output),
            None => output,
        }
    }
}

impl Default for Transformer {
    fn default() -> Self {
        let config = GridConfig::default();
        Transformer {
            names: config.tag_names(),
            config,
            legacy: None,
            cleanup: None,
        }
    }
}

impl FormFilter for Transformer {
    fn name(&self) -> &str {
        "grid"
    }

    fn filter(&self, markup: &str) -> String {
        self.transform(markup)
    }
}
