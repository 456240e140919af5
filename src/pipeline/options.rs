//! Pipeline options and configuration.

use std::time::Duration;

use crate::assemble::DEFAULT_FALLBACK_TITLE;
use crate::classify::DEFAULT_BATCH_SIZE;
use crate::error::{Error, Result};
use crate::filter::{FilterOptions, FilterPreset};
use crate::tagger::ThresholdProfile;

/// Options for building document outlines.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Tag thresholds
    pub profile: ThresholdProfile,

    /// Pre-classification block filtering
    pub filter: FilterOptions,

    /// Feature strings sent per classifier call
    pub batch_size: usize,

    /// Whether classifier requests carry neighbouring feature strings
    pub context_window: bool,

    /// Wall-clock budget for classifying one document
    pub time_budget: Option<Duration>,

    /// Whether to process batches of documents in parallel
    pub parallel: bool,

    /// Title for documents without blocks and without a metadata title
    pub fallback_title: String,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold profile.
    pub fn with_profile(mut self, profile: ThresholdProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set filter options.
    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    /// Set the filter preset.
    pub fn with_filter_preset(mut self, preset: FilterPreset) -> Self {
        self.filter = FilterOptions::from_preset(preset);
        self
    }

    /// Set the classifier batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Enable or disable neighbour context.
    pub fn with_context_window(mut self, enabled: bool) -> Self {
        self.context_window = enabled;
        self
    }

    /// Set the per-document classification budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Check the options before running the pipeline.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".into()));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(Error::InvalidConfig("time budget must be positive".into()));
        }
        Ok(())
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            profile: ThresholdProfile::default(),
            filter: FilterOptions::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            context_window: false,
            time_budget: None,
            parallel: true,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_options_builder() {
        let options = OutlineOptions::new()
            .with_batch_size(8)
            .with_context_window(true)
            .with_time_budget(Duration::from_millis(500))
            .with_filter_preset(FilterPreset::Standard)
            .sequential();

        assert_eq!(options.batch_size, 8);
        assert!(options.context_window);
        assert_eq!(options.time_budget, Some(Duration::from_millis(500)));
        assert!(options.filter.is_enabled());
        assert!(!options.parallel);
    }

    #[test]
    fn test_outline_options_defaults() {
        let options = OutlineOptions::default();
        assert_eq!(options.batch_size, 32);
        assert!(!options.context_window);
        assert!(options.time_budget.is_none());
        assert!(options.parallel);
        assert!(!options.filter.is_enabled());
        assert_eq!(options.fallback_title, "Untitled");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_batch_size_clamped() {
        assert_eq!(OutlineOptions::new().with_batch_size(0).batch_size, 1);
    }

    #[test]
    fn test_validate_rejects_bad_profile() {
        let options =
            OutlineOptions::new().with_profile(ThresholdProfile::new().with_font_bounds(2.0, 1.0));
        assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));

        let options = OutlineOptions::new().with_time_budget(Duration::ZERO);
        assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));
    }
}
