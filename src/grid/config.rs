//! Configuration loading for lean-grid
//!
//! `defaults/lean-grid.default.toml` is embedded into the library so the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user-specific files and overrides on top of those defaults via [`Loader`]
//! before deserializing into [`Settings`].
//!
//! Settings are built once and then only read: the transformer and the
//! feature pipeline take them by reference and never mutate them.

use crate::grid::ast::{TagKind, TagNames};
use crate::grid::features::FeatureSet;
use crate::grid::render::sanitize_class;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../../defaults/lean-grid.default.toml");
const LEAN_FORMS_TOML: &str = include_str!("../../defaults/lean-forms.preset.toml");

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid grid configuration: {0}")]
    Invalid(String),
    #[error("invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Top-level configuration consumed by lean-grid applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub features: FeatureSet,
}

/// How opening and closing tags are paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingMode {
    /// Pair by nesting depth with an explicit tag stack
    #[default]
    Balanced,
    /// Pair each opening tag with the first closing tag of the same name
    /// that follows it, rows before columns
    Legacy,
}

/// Knobs of the grid transformer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub row_tag: String,
    pub col_tag: String,
    pub row_class: String,
    pub col_class: String,
    pub gap_property: String,
    pub default_gap: u64,
    pub default_col: u64,
    pub max_depth: usize,
    pub matching: MatchingMode,
    pub closing_comments: bool,
    pub autop_cleanup: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            row_tag: "row".into(),
            col_tag: "col".into(),
            row_class: "grid-row".into(),
            col_class: "grid-col".into(),
            gap_property: "--grid-gap".into(),
            default_gap: 16,
            default_col: 12,
            max_depth: 256,
            matching: MatchingMode::Balanced,
            closing_comments: false,
            autop_cleanup: false,
        }
    }
}

impl GridConfig {
    /// Tag, class and property names used by the Lean Forms plugin, which
    /// existing forms in the wild were authored against
    pub fn lean_forms() -> Self {
        GridConfig {
            row_tag: "lfcf7-row".into(),
            col_tag: "lfcf7-col".into(),
            row_class: "lf-row".into(),
            col_class: "lf-col".into(),
            gap_property: "--lf-gap".into(),
            closing_comments: true,
            autop_cleanup: true,
            ..GridConfig::default()
        }
    }

    pub fn tag_names(&self) -> TagNames {
        TagNames::new(self.row_tag.clone(), self.col_tag.clone())
    }

    pub fn class_for(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Row => &self.row_class,
            TagKind::Col => &self.col_class,
        }
    }

    /// Check the invariants the transformer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [("row_tag", &self.row_tag), ("col_tag", &self.col_tag)] {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a non-empty run of [A-Za-z0-9_-], got {name:?}"
                )));
            }
        }
        if self.row_tag == self.col_tag {
            return Err(ConfigError::Invalid(format!(
                "row_tag and col_tag must differ, both are {:?}",
                self.row_tag
            )));
        }
        for (field, class) in [("row_class", &self.row_class), ("col_class", &self.col_class)] {
            if class.is_empty() || sanitize_class(class) != *class {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a single CSS class token, got {class:?}"
                )));
            }
        }
        if !self.gap_property.starts_with("--") || sanitize_class(&self.gap_property) != self.gap_property {
            return Err(ConfigError::Invalid(format!(
                "gap_property must be a CSS custom property name, got {:?}",
                self.gap_property
            )));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.autop_cleanup && !self.closing_comments {
            return Err(ConfigError::Invalid(
                "autop_cleanup relies on closing_comments markers".into(),
            ));
        }
        Ok(())
    }
}

/// Named bundles of settings, each backed by an embedded TOML layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Names and markers of the Lean Forms plugin
    LeanForms,
}

impl Preset {
    pub const ALL: [Preset; 1] = [Preset::LeanForms];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::LeanForms => "lean-forms",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Preset::ALL.into_iter().find(|preset| preset.name() == name)
    }

    /// The TOML layer this preset contributes
    pub fn source(&self) -> &'static str {
        match self {
            Preset::LeanForms => LEAN_FORMS_TOML,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
///
/// Presets and files are layered in call order, later layers winning.
/// Overrides set through [`Loader::set_override`] beat every layer.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer the settings of a preset. Files layered afterwards override it.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(preset.source(), FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.builder.build()?.try_deserialize()?;
        settings.grid.validate()?;
        tracing::debug!(
            row_tag = %settings.grid.row_tag,
            col_tag = %settings.grid.col_tag,
            matching = ?settings.grid.matching,
            "configuration loaded"
        );
        Ok(settings)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
