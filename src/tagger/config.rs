//! Threshold profiles for semantic tagging.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Bucket boundaries and formatting constants for the tagger.
///
/// A profile is fixed configuration, not learned. The feature strings a
/// classifier was trained on must be produced with the same profile at
/// inference time, so profiles carry a name and version for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdProfile {
    /// Profile name
    pub name: String,

    /// Profile version, bumped whenever a boundary or format changes
    pub version: u32,

    /// Relative font size above which `FONT_HIGH` is emitted
    pub font_high: f32,

    /// Relative font size above which `FONT_MED` is emitted
    pub font_med: f32,

    /// Vertical position below which `POS_TOP` is emitted
    pub pos_top: f32,

    /// Vertical position above which `POS_BOTTOM` is emitted
    pub pos_bottom: f32,

    /// Largest word count still tagged `LEN_SHORT`
    pub short_max_words: usize,

    /// Maximum number of text characters appended after the tags
    pub max_text_chars: usize,

    /// String placed between consecutive tags
    pub tag_separator: String,
}

impl ThresholdProfile {
    /// Create the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font boundaries.
    pub fn with_font_bounds(mut self, med: f32, high: f32) -> Self {
        self.font_med = med;
        self.font_high = high;
        self
    }

    /// Set the position boundaries.
    pub fn with_position_bounds(mut self, top: f32, bottom: f32) -> Self {
        self.pos_top = top;
        self.pos_bottom = bottom;
        self
    }

    /// Set the short/long word boundary.
    pub fn with_short_max_words(mut self, words: usize) -> Self {
        self.short_max_words = words;
        self
    }

    /// Set the text truncation point.
    pub fn with_max_text_chars(mut self, chars: usize) -> Self {
        self.max_text_chars = chars;
        self
    }

    /// Set the separator between tags.
    pub fn with_tag_separator(mut self, separator: impl Into<String>) -> Self {
        self.tag_separator = separator.into();
        self
    }

    /// Check that the boundaries are finite and ordered.
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.font_high, self.font_med, self.pos_top, self.pos_bottom];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "profile {} v{} has non-finite bounds",
                self.name, self.version
            )));
        }
        if self.font_med > self.font_high {
            return Err(Error::InvalidConfig(format!(
                "font_med ({}) must not exceed font_high ({})",
                self.font_med, self.font_high
            )));
        }
        if !(0.0..=1.0).contains(&self.pos_top) || !(0.0..=1.0).contains(&self.pos_bottom) {
            return Err(Error::InvalidConfig(
                "position bounds must lie within [0, 1]".to_string(),
            ));
        }
        if self.pos_top > self.pos_bottom {
            return Err(Error::InvalidConfig(format!(
                "pos_top ({}) must not exceed pos_bottom ({})",
                self.pos_top, self.pos_bottom
            )));
        }
        if self.max_text_chars == 0 {
            return Err(Error::InvalidConfig(
                "max_text_chars must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a profile from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the profile as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            version: 1,
            font_high: 1.4,
            font_med: 1.0,
            pos_top: 0.15,
            pos_bottom: 0.85,
            short_max_words: 8,
            max_text_chars: 512,
            tag_separator: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = ThresholdProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.font_high, 1.4);
        assert_eq!(profile.short_max_words, 8);
    }

    #[test]
    fn test_builder() {
        let profile = ThresholdProfile::new()
            .with_font_bounds(1.1, 1.5)
            .with_position_bounds(0.2, 0.8)
            .with_short_max_words(5)
            .with_tag_separator(" ");

        assert_eq!(profile.font_med, 1.1);
        assert_eq!(profile.pos_bottom, 0.8);
        assert_eq!(profile.short_max_words, 5);
        assert_eq!(profile.tag_separator, " ");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_invalid_profiles() {
        let inverted = ThresholdProfile::new().with_font_bounds(1.6, 1.2);
        assert!(matches!(inverted.validate(), Err(Error::InvalidConfig(_))));

        let out_of_range = ThresholdProfile::new().with_position_bounds(-0.1, 0.9);
        assert!(out_of_range.validate().is_err());

        let nan = ThresholdProfile::new().with_font_bounds(f32::NAN, 1.4);
        assert!(nan.validate().is_err());

        let zero = ThresholdProfile::new().with_max_text_chars(0);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let profile = ThresholdProfile::from_json(r#"{"version": 2, "font_high": 1.5}"#).unwrap();
        assert_eq!(profile.version, 2);
        assert_eq!(profile.font_high, 1.5);
        assert_eq!(profile.pos_top, 0.15);
    }

    #[test]
    fn test_json_rejects_invalid_bounds() {
        let result = ThresholdProfile::from_json(r#"{"pos_top": 0.9, "pos_bottom": 0.1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let json = ThresholdProfile::default().to_json().unwrap();
        std::fs::write(&path, json).unwrap();

        let profile = ThresholdProfile::from_file(&path).unwrap();
        assert_eq!(profile, ThresholdProfile::default());
    }
}
