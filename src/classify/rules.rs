//! Rule-based fallback classifier.
//!
//! Reads the semantic tags back out of a feature string and combines them
//! with numbering cues in the text. Used when no trained model is wired in.

use regex::Regex;

use super::{Classifier, ClassifierRequest, Prediction};
use crate::error::Result;
use crate::model::{FeatureString, Label};
use crate::tagger::{FontBucket, LengthBucket, PositionBucket, STYLE_BOLD};

/// Deterministic classifier driven by tag combinations.
///
/// | font | position | bold | label |
/// |------|----------|------|-------|
/// | HIGH | TOP      | any  | Title |
/// | HIGH | other    | any  | H1    |
/// | MED  | any      | yes  | H2    |
/// | MED  | any      | no   | H3    |
/// | LOW  | any      | yes  | H3    |
/// | LOW  | any      | no   | P     |
///
/// `LEN_LONG` blocks and blocks without letters are always `P`. A numbering
/// prefix (`2.`, `2.1`, `2.1.4`) overrides the level of MED/LOW headings, and
/// `Chapter`/`Part`/`Appendix` prefixes mark an H1.
pub struct RuleBasedClassifier {
    numbered: Regex,
    chapter: Regex,
}

impl RuleBasedClassifier {
    /// Create the classifier.
    pub fn new() -> Self {
        Self {
            numbered: Regex::new(r"^\s*(\d+(?:\.\d+)*)\.?\s+\S").unwrap(),
            chapter: Regex::new(r"^\s*(?i:chapter|part|appendix)\s+[A-Z0-9]+\b").unwrap(),
        }
    }

    /// Label a single feature string.
    pub fn label(&self, feature: &FeatureString) -> Label {
        let parsed = ParsedFeature::parse(feature);

        if parsed.length == Some(LengthBucket::Long)
            || !parsed.text.chars().any(char::is_alphabetic)
        {
            return Label::P;
        }

        let base = match (parsed.font, parsed.bold) {
            (Some(FontBucket::High), _) => {
                if parsed.position == Some(PositionBucket::Top) {
                    return Label::Title;
                }
                Label::H1
            }
            (Some(FontBucket::Med), true) => Label::H2,
            (Some(FontBucket::Med), false) => Label::H3,
            (Some(FontBucket::Low), true) | (None, true) => Label::H3,
            (Some(FontBucket::Low), false) | (None, false) => Label::P,
        };

        if base == Label::H1 {
            return base;
        }
        if self.chapter.is_match(parsed.text) && (parsed.bold || base != Label::P) {
            return Label::H1;
        }
        if let Some(depth) = self.numbering_depth(parsed.text) {
            if base != Label::P || parsed.bold {
                return match depth {
                    1 => Label::H1,
                    2 => Label::H2,
                    _ => Label::H3,
                };
            }
        }
        base
    }

    /// Depth of a leading section number (`3` → 1, `3.2` → 2, `3.2.1` → 3).
    fn numbering_depth(&self, text: &str) -> Option<usize> {
        self.numbered
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().split('.').count())
    }
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for RuleBasedClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    fn classify(&self, batch: &[ClassifierRequest]) -> Result<Vec<Prediction>> {
        Ok(batch
            .iter()
            .map(|req| Prediction::new(self.label(&req.feature).as_str()))
            .collect())
    }
}

/// Tags and text recovered from a feature string.
struct ParsedFeature<'a> {
    bold: bool,
    font: Option<FontBucket>,
    position: Option<PositionBucket>,
    length: Option<LengthBucket>,
    text: &'a str,
}

impl<'a> ParsedFeature<'a> {
    fn parse(feature: &'a FeatureString) -> Self {
        let mut parsed = ParsedFeature {
            bold: false,
            font: None,
            position: None,
            length: None,
            text: feature.text(),
        };

        for token in feature.tags() {
            match token {
                STYLE_BOLD => parsed.bold = true,
                "[FONT_HIGH]" => parsed.font = Some(FontBucket::High),
                "[FONT_MED]" => parsed.font = Some(FontBucket::Med),
                "[FONT_LOW]" => parsed.font = Some(FontBucket::Low),
                "[POS_TOP]" => parsed.position = Some(PositionBucket::Top),
                "[POS_MID]" => parsed.position = Some(PositionBucket::Mid),
                "[POS_BOTTOM]" => parsed.position = Some(PositionBucket::Bottom),
                "[LEN_SHORT]" => parsed.length = Some(LengthBucket::Short),
                "[LEN_LONG]" => parsed.length = Some(LengthBucket::Long),
                _ => {}
            }
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Label {
        RuleBasedClassifier::new().label(&FeatureString::new(s))
    }

    #[test]
    fn test_title() {
        assert_eq!(
            label("[STYLE_BOLD][FONT_HIGH][POS_TOP][LEN_SHORT] Annual Report"),
            Label::Title
        );
    }

    #[test]
    fn test_font_levels() {
        assert_eq!(label("[FONT_HIGH][POS_MID][LEN_SHORT] Overview"), Label::H1);
        assert_eq!(label("[STYLE_BOLD][FONT_MED][POS_MID][LEN_SHORT] Scope"), Label::H2);
        assert_eq!(label("[FONT_MED][POS_MID][LEN_SHORT] Scope"), Label::H3);
        assert_eq!(label("[STYLE_BOLD][FONT_LOW][POS_MID][LEN_SHORT] Notes"), Label::H3);
        assert_eq!(label("[FONT_LOW][POS_MID][LEN_SHORT] plain words"), Label::P);
    }

    #[test]
    fn test_long_blocks_are_paragraphs() {
        assert_eq!(
            label("[STYLE_BOLD][FONT_HIGH][POS_TOP][LEN_LONG] A very long bold line"),
            Label::P
        );
    }

    #[test]
    fn test_no_letters_is_paragraph() {
        assert_eq!(label("[STYLE_BOLD][FONT_MED][POS_BOTTOM][LEN_SHORT] 12"), Label::P);
    }

    #[test]
    fn test_numbering_overrides_level() {
        assert_eq!(label("[STYLE_BOLD][FONT_LOW][POS_MID][LEN_SHORT] 2. Background"), Label::H1);
        assert_eq!(label("[FONT_MED][POS_MID][LEN_SHORT] 2.1 Goals"), Label::H2);
        assert_eq!(label("[STYLE_BOLD][FONT_LOW][POS_MID][LEN_SHORT] 2.1.4 Risks"), Label::H3);
        // Numbered body text stays body text.
        assert_eq!(label("[FONT_LOW][POS_MID][LEN_SHORT] 3 apples"), Label::P);
    }

    #[test]
    fn test_chapter_prefix() {
        assert_eq!(label("[STYLE_BOLD][FONT_LOW][POS_TOP][LEN_SHORT] Appendix B"), Label::H1);
        assert_eq!(label("[FONT_MED][POS_MID][LEN_SHORT] Chapter 4 Results"), Label::H1);
    }

    #[test]
    fn test_spaced_tags_parse() {
        assert_eq!(
            label("[STYLE_BOLD] [FONT_HIGH] [POS_TOP] [LEN_SHORT] Report"),
            Label::Title
        );
    }

    #[test]
    fn test_bracketed_text_is_not_a_tag() {
        let feature = FeatureString::new("[FONT_LOW][POS_MID][LEN_SHORT] [draft] notes");
        let parsed = ParsedFeature::parse(&feature);
        assert_eq!(parsed.text, "[draft] notes");
        assert_eq!(parsed.font, Some(FontBucket::Low));
    }

    #[test]
    fn test_tag_words_in_text_are_ignored() {
        assert_eq!(
            label("[FONT_LOW][POS_MID][LEN_SHORT] [FONT_HIGH] [POS_TOP] note"),
            Label::P
        );
    }

    #[test]
    fn test_classify_batch() {
        let classifier = RuleBasedClassifier::default();
        let batch = vec![
            ClassifierRequest::new(FeatureString::new("[FONT_HIGH][POS_TOP][LEN_SHORT] T")),
            ClassifierRequest::new(FeatureString::new("[FONT_LOW][POS_MID][LEN_LONG] body")),
        ];
        let predictions = classifier.classify(&batch).unwrap();
        assert_eq!(predictions[0].label, "Title");
        assert_eq!(predictions[1].label, "P");
    }
}
