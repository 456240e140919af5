//! Semantic tag vocabulary.

use serde::{Deserialize, Serialize};

use super::ThresholdProfile;
use crate::model::FeatureVector;

/// Relative font size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontBucket {
    /// Well above body size
    High,
    /// Somewhat above body size
    Med,
    /// Body size or smaller
    Low,
}

/// Vertical position bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionBucket {
    /// Near the top of the page
    Top,
    /// Middle of the page
    Mid,
    /// Near the bottom of the page
    Bottom,
}

/// Word count bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthBucket {
    /// Few words
    Short,
    /// Many words
    Long,
}

impl FontBucket {
    /// Tag token.
    pub fn token(&self) -> &'static str {
        match self {
            FontBucket::High => "[FONT_HIGH]",
            FontBucket::Med => "[FONT_MED]",
            FontBucket::Low => "[FONT_LOW]",
        }
    }
}

impl PositionBucket {
    /// Tag token.
    pub fn token(&self) -> &'static str {
        match self {
            PositionBucket::Top => "[POS_TOP]",
            PositionBucket::Mid => "[POS_MID]",
            PositionBucket::Bottom => "[POS_BOTTOM]",
        }
    }
}

impl LengthBucket {
    /// Tag token.
    pub fn token(&self) -> &'static str {
        match self {
            LengthBucket::Short => "[LEN_SHORT]",
            LengthBucket::Long => "[LEN_LONG]",
        }
    }
}

/// Token emitted for bold blocks. Non-bold blocks emit nothing.
pub const STYLE_BOLD: &str = "[STYLE_BOLD]";

/// The discrete tags of one block.
///
/// Field order is the canonical tag order: style, font, position, length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticTagSet {
    /// Bold face
    pub bold: bool,
    /// Font size bucket
    pub font: FontBucket,
    /// Position bucket
    pub position: PositionBucket,
    /// Length bucket
    pub length: LengthBucket,
}

impl SemanticTagSet {
    /// Bucket a feature vector under a threshold profile.
    pub fn from_features(vector: &FeatureVector, profile: &ThresholdProfile) -> Self {
        let rfs = vector.relative_font_size;
        let font = if rfs > profile.font_high {
            FontBucket::High
        } else if rfs > profile.font_med {
            FontBucket::Med
        } else {
            FontBucket::Low
        };

        let pos = vector.vertical_position;
        let position = if pos < profile.pos_top {
            PositionBucket::Top
        } else if pos > profile.pos_bottom {
            PositionBucket::Bottom
        } else {
            PositionBucket::Mid
        };

        let length = if vector.word_count <= profile.short_max_words {
            LengthBucket::Short
        } else {
            LengthBucket::Long
        };

        Self {
            bold: vector.is_bold,
            font,
            position,
            length,
        }
    }

    /// Tag tokens in canonical order.
    pub fn tokens(&self) -> Vec<&'static str> {
        let mut tokens = Vec::with_capacity(4);
        if self.bold {
            tokens.push(STYLE_BOLD);
        }
        tokens.push(self.font.token());
        tokens.push(self.position.token());
        tokens.push(self.length.token());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(rfs: f32, pos: f32, bold: bool, words: usize) -> SemanticTagSet {
        SemanticTagSet::from_features(
            &FeatureVector::new(rfs, pos, bold, words),
            &ThresholdProfile::default(),
        )
    }

    #[test]
    fn test_font_boundaries() {
        assert_eq!(tags(1.41, 0.5, false, 1).font, FontBucket::High);
        assert_eq!(tags(1.4, 0.5, false, 1).font, FontBucket::Med);
        assert_eq!(tags(1.01, 0.5, false, 1).font, FontBucket::Med);
        assert_eq!(tags(1.0, 0.5, false, 1).font, FontBucket::Low);
        assert_eq!(tags(0.6, 0.5, false, 1).font, FontBucket::Low);
    }

    #[test]
    fn test_position_boundaries() {
        assert_eq!(tags(1.0, 0.149, false, 1).position, PositionBucket::Top);
        assert_eq!(tags(1.0, 0.15, false, 1).position, PositionBucket::Mid);
        assert_eq!(tags(1.0, 0.85, false, 1).position, PositionBucket::Mid);
        assert_eq!(tags(1.0, 0.851, false, 1).position, PositionBucket::Bottom);
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(tags(1.0, 0.5, false, 8).length, LengthBucket::Short);
        assert_eq!(tags(1.0, 0.5, false, 9).length, LengthBucket::Long);
        assert_eq!(tags(1.0, 0.5, false, 0).length, LengthBucket::Short);
    }

    #[test]
    fn test_bold_absent_when_not_bold() {
        assert_eq!(
            tags(1.0, 0.5, false, 20).tokens(),
            vec!["[FONT_LOW]", "[POS_MID]", "[LEN_LONG]"]
        );
        assert_eq!(tags(2.0, 0.05, true, 3).tokens()[0], STYLE_BOLD);
    }
}
