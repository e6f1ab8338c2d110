//! Feature toggles and the form-markup filter pipeline
//!
//! The set of features is closed: every feature is a [`Feature`] variant and
//! the markup filter it contributes is chosen by a `match`, so an unknown key
//! is a parse error rather than a lookup that silently finds nothing.
//!
//! A [`FeatureSet`] is built once from configuration and never changes
//! afterwards. [`FormPipeline`] turns the enabled features into an ordered
//! list of [`FormFilter`]s applied to every rendered form.

use crate::grid::config::{ConfigError, GridConfig, Settings};
use crate::grid::transform::Transformer;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A transformation applied to form markup before it is rendered
pub trait FormFilter: Send + Sync {
    /// The name of this filter (e.g., "grid")
    fn name(&self) -> &str;

    /// Rewrite the markup. Filters never fail; unknown input passes through.
    fn filter(&self, markup: &str) -> String;
}

/// Features known to the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Grid,
    Entries,
    FormPresets,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Grid, Feature::Entries, Feature::FormPresets];

    /// Registry key, as used in configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Feature::Grid => "grid",
            Feature::Entries => "entries",
            Feature::FormPresets => "form_presets",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Grid => "Grid System",
            Feature::Entries => "Entries Management",
            Feature::FormPresets => "Form Presets",
        }
    }

    pub fn enabled_by_default(&self) -> bool {
        matches!(self, Feature::Grid)
    }

    /// The markup filter this feature contributes, if any
    ///
    /// Entries and presets act on submissions and styling, not on form
    /// markup, so they have no filter.
    pub fn form_filter(
        &self,
        grid: &GridConfig,
    ) -> Result<Option<Box<dyn FormFilter>>, ConfigError> {
        match self {
            Feature::Grid => Ok(Some(Box::new(Transformer::new(grid.clone())?))),
            Feature::Entries | Feature::FormPresets => Ok(None),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.key() == key)
            .ok_or_else(|| UnknownFeature(key.to_string()))
    }
}

/// On/off switches as they appear in the `[features]` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub grid: bool,
    pub entries: bool,
    pub form_presets: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        FeatureToggles {
            grid: Feature::Grid.enabled_by_default(),
            entries: Feature::Entries.enabled_by_default(),
            form_presets: Feature::FormPresets.enabled_by_default(),
        }
    }
}

/// The immutable set of enabled features
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FeatureToggles")]
pub struct FeatureSet {
    enabled: Vec<Feature>,
}

impl FeatureSet {
    /// A set with exactly the given features enabled
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        let mut enabled: Vec<Feature> = features.into_iter().collect();
        enabled.sort();
        enabled.dedup();
        FeatureSet { enabled }
    }

    pub fn none() -> Self {
        FeatureSet {
            enabled: Vec::new(),
        }
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Enabled features in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        FeatureToggles::default().into()
    }
}

impl From<FeatureToggles> for FeatureSet {
    fn from(toggles: FeatureToggles) -> Self {
        let FeatureToggles {
            grid,
            entries,
            form_presets,
        } = toggles;
        FeatureSet::new(
            [
                (Feature::Grid, grid),
                (Feature::Entries, entries),
                (Feature::FormPresets, form_presets),
            ]
            .into_iter()
            .filter_map(|(feature, on)| on.then_some(feature)),
        )
    }
}

/// The filters of all enabled features, in declaration order
pub struct FormPipeline {
    filters: Vec<Box<dyn FormFilter>>,
}

impl FormPipeline {
    pub fn new(features: &FeatureSet, grid: &GridConfig) -> Result<Self, ConfigError> {
        let mut filters = Vec::new();
        for feature in features.iter() {
            if let Some(filter) = feature.form_filter(grid)? {
                tracing::debug!(feature = %feature, filter = filter.name(), "form filter enabled");
                filters.push(filter);
            }
        }
        Ok(FormPipeline { filters })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(&settings.features, &settings.grid)
    }

    /// Run the markup through every enabled filter
    pub fn render(&self, markup: &str) -> String {
        let mut output = markup.to_string();
        for filter in &self.filters {
            output = filter.filter(&output);
        }
        output
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FormPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormPipeline")
            .field("filters", &self.filter_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_keys_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(feature.key().parse::<Feature>(), Ok(feature));
        }
        assert_eq!(
            "analytics".parse::<Feature>(),
            Err(UnknownFeature("analytics".into()))
        );
    }

    #[test]
    fn test_default_set_enables_grid_only() {
        let features = FeatureSet::default();
        assert_eq!(features.iter().collect::<Vec<_>>(), vec![Feature::Grid]);
    }

    #[test]
    fn test_new_orders_and_dedups() {
        let features = FeatureSet::new([Feature::FormPresets, Feature::Grid, Feature::Grid]);
        assert_eq!(
            features.iter().collect::<Vec<_>>(),
            vec![Feature::Grid, Feature::FormPresets]
        );
    }

    #[test]
    fn test_pipeline_with_grid() {
        let pipeline = FormPipeline::new(&FeatureSet::default(), &GridConfig::default()).unwrap();
        assert_eq!(pipeline.filter_names(), vec!["grid"]);
        assert_eq!(
            pipeline.render("[row][/row]"),
            r#"<div class="grid-row" style="--grid-gap: 16px;"></div>"#
        );
    }

    #[test]
    fn test_pipeline_without_grid_passes_markup_through() {
        let features = FeatureSet::new([Feature::Entries, Feature::FormPresets]);
        let pipeline = FormPipeline::new(&features, &GridConfig::default()).unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.render("[row][/row]"), "[row][/row]");
    }

    #[test]
    fn test_pipeline_rejects_invalid_grid_config() {
        let mut grid = GridConfig::default();
        grid.max_depth = 0;
        assert!(FormPipeline::new(&FeatureSet::default(), &grid).is_err());
        assert!(FormPipeline::new(&FeatureSet::none(), &grid).is_ok());
    }
}
