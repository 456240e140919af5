//! Text block types produced by upstream PDF extraction.

use serde::{Deserialize, Serialize};

/// Default page height in points (US Letter), used when a block does not
/// carry the height of its page.
pub const LETTER_HEIGHT: f32 = 792.0;

/// Bounding box of a block in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top edge (distance from the top of the page)
    pub top: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Left edge
    pub left: f32,
    /// Right edge
    pub right: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Check that every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
            && self.right.is_finite()
    }
}

/// One contiguous run of text sharing style, as extracted from a page.
///
/// Blocks are created once per document by the extraction stage and are not
/// mutated by the outline pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The text content
    pub text: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_name: String,

    /// Font size in points, `None` when the extractor could not determine it
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Whether the block is set in a bold face
    #[serde(default)]
    pub is_bold: bool,

    /// Position of the block on its page, `None` when the extractor did not
    /// report one
    #[serde(
        rename = "bbox",
        alias = "bounding_box",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bounding_box: Option<BoundingBox>,

    /// Height of the page the block sits on
    #[serde(default = "default_page_height")]
    pub page_height: f32,

    /// Word count as reported by the extractor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    /// Text color as a packed RGB integer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

fn default_page_height() -> f32 {
    LETTER_HEIGHT
}

impl TextBlock {
    /// Create a new block on a Letter-sized page, without a position.
    pub fn new(text: impl Into<String>, page_number: u32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            page_number,
            font_name: String::new(),
            font_size: Some(font_size),
            is_bold: false,
            bounding_box: None,
            page_height: LETTER_HEIGHT,
            word_count: None,
            color: None,
        }
    }

    /// Set the font name. Bold is inferred from the name as well.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        let lower = self.font_name.to_lowercase();
        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            self.is_bold = true;
        }
        self
    }

    /// Mark the block as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Place the block at `top` points from the top of its page.
    pub fn at(mut self, top: f32) -> Self {
        let height = self.font_size.unwrap_or(0.0).max(0.0);
        let (left, right) = self
            .bounding_box
            .map_or((0.0, 0.0), |b| (b.left, b.right));
        self.bounding_box = Some(BoundingBox::new(top, top + height, left, right));
        self
    }

    /// Set the page height.
    pub fn with_page_height(mut self, height: f32) -> Self {
        self.page_height = height;
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Number of words, taken from the extractor or counted from the text.
    pub fn word_count(&self) -> usize {
        self.word_count
            .unwrap_or_else(|| self.text.split_whitespace().count())
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Font size if it is present, finite and positive.
    pub fn valid_font_size(&self) -> Option<f32> {
        self.font_size.filter(|s| s.is_finite() && *s > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_fallback() {
        let block = TextBlock::new("Three short words", 1, 12.0);
        assert_eq!(block.word_count(), 3);

        let mut block = block;
        block.word_count = Some(7);
        assert_eq!(block.word_count(), 7);
    }

    #[test]
    fn test_bold_from_font_name() {
        let block = TextBlock::new("Heading", 1, 14.0).with_font_name("Helvetica-Bold");
        assert!(block.is_bold);

        let block = TextBlock::new("Body", 1, 11.0).with_font_name("Times-Roman");
        assert!(!block.is_bold);
    }

    #[test]
    fn test_valid_font_size() {
        let mut block = TextBlock::new("x", 1, 12.0);
        assert_eq!(block.valid_font_size(), Some(12.0));

        block.font_size = None;
        assert_eq!(block.valid_font_size(), None);

        block.font_size = Some(f32::NAN);
        assert_eq!(block.valid_font_size(), None);

        block.font_size = Some(0.0);
        assert_eq!(block.valid_font_size(), None);
    }

    #[test]
    fn test_deserialize_minimal_block() {
        let json = r#"{"text": "Intro", "page_number": 2, "font_size": 16.0,
                       "bbox": {"top": 72.0, "bottom": 90.0, "left": 50.0, "right": 300.0}}"#;
        let block: TextBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.page_number, 2);
        assert_eq!(block.page_height, LETTER_HEIGHT);
        assert_eq!(block.bounding_box.map(|b| b.top), Some(72.0));
        assert!(!block.is_bold);
    }

    #[test]
    fn test_deserialize_null_font_size() {
        let json = r#"{"text": "Broken", "page_number": 1, "font_size": null}"#;
        let block: TextBlock = serde_json::from_str(json).unwrap();
        assert!(block.font_size.is_none());
        assert!(block.bounding_box.is_none());
    }

    #[test]
    fn test_at_keeps_horizontal_extent() {
        let block = TextBlock::new("x", 1, 10.0)
            .with_bbox(BoundingBox::new(0.0, 10.0, 50.0, 300.0))
            .at(120.0);
        assert_eq!(
            block.bounding_box,
            Some(BoundingBox::new(120.0, 130.0, 50.0, 300.0))
        );
    }
}
