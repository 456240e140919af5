//! Semantic tagging: feature vectors to classifier feature strings.
//!
//! A feature string is the block's tags in canonical order (style, font,
//! position, length) followed by a space and the block text, truncated to the
//! profile's character limit:
//!
//! ```text
//! [STYLE_BOLD][FONT_HIGH][POS_TOP][LEN_SHORT] Annual Report 2024
//! ```
//!
//! The classifier learned its associations from strings in exactly this
//! format, so identical bucket memberships must always yield byte-identical
//! strings.

mod config;
mod tags;

pub use config::ThresholdProfile;
pub use tags::{FontBucket, LengthBucket, PositionBucket, SemanticTagSet, STYLE_BOLD};

use crate::model::{FeatureString, FeatureVector};

/// Converts feature vectors into feature strings under one profile.
#[derive(Debug, Clone, Default)]
pub struct Tagger {
    profile: ThresholdProfile,
}

impl Tagger {
    /// Create a tagger for a profile.
    pub fn new(profile: ThresholdProfile) -> Self {
        Self { profile }
    }

    /// The profile in use.
    pub fn profile(&self) -> &ThresholdProfile {
        &self.profile
    }

    /// Bucket a feature vector.
    pub fn tag_set(&self, vector: &FeatureVector) -> SemanticTagSet {
        SemanticTagSet::from_features(vector, &self.profile)
    }

    /// Build the feature string for one block.
    pub fn tag(&self, vector: &FeatureVector, text: &str) -> FeatureString {
        self.format(&self.tag_set(vector), text)
    }

    /// Format a tag set and text into a feature string.
    pub fn format(&self, tags: &SemanticTagSet, text: &str) -> FeatureString {
        let prefix = tags.tokens().join(&self.profile.tag_separator);
        let text = truncate_chars(text, self.profile.max_text_chars);
        FeatureString::new(format!("{} {}", prefix, text))
    }
}

/// Truncate to at most `max` characters, on a character boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_block_feature_string() {
        let tagger = Tagger::default();
        let vector = FeatureVector::new(2.0, 0.05, true, 3);
        let fs = tagger.tag(&vector, "Annual Report 2024");
        assert_eq!(
            fs.as_str(),
            "[STYLE_BOLD][FONT_HIGH][POS_TOP][LEN_SHORT] Annual Report 2024"
        );
    }

    #[test]
    fn test_body_block_feature_string() {
        let tagger = Tagger::default();
        let vector = FeatureVector::new(1.0, 0.5, false, 30);
        assert_eq!(
            tagger.tag(&vector, "body").as_str(),
            "[FONT_LOW][POS_MID][LEN_LONG] body"
        );
    }

    #[test]
    fn test_identical_buckets_identical_strings() {
        let tagger = Tagger::default();
        // Different raw values, same bucket memberships.
        let a = FeatureVector::new(1.9, 0.02, true, 2);
        let b = FeatureVector::new(3.5, 0.10, true, 7);
        assert_eq!(tagger.tag(&a, "Same"), tagger.tag(&b, "Same"));
    }

    #[test]
    fn test_low_confidence_does_not_change_string() {
        let tagger = Tagger::default();
        let a = FeatureVector::new(1.2, 0.5, false, 4);
        let mut b = a;
        b.low_confidence = true;
        assert_eq!(tagger.tag(&a, "x"), tagger.tag(&b, "x"));
    }

    #[test]
    fn test_truncation_on_char_boundary() {
        let tagger = Tagger::new(ThresholdProfile::new().with_max_text_chars(3));
        let vector = FeatureVector::new(1.0, 0.5, false, 1);
        assert_eq!(
            tagger.tag(&vector, "héllo").as_str(),
            "[FONT_LOW][POS_MID][LEN_SHORT] hél"
        );
    }

    #[test]
    fn test_custom_separator() {
        let tagger = Tagger::new(ThresholdProfile::new().with_tag_separator(" "));
        let vector = FeatureVector::new(1.2, 0.9, true, 12);
        assert_eq!(
            tagger.tag(&vector, "Footer").as_str(),
            "[STYLE_BOLD] [FONT_MED] [POS_BOTTOM] [LEN_LONG] Footer"
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(truncate_chars("한국어", 2), "한국");
    }
}
