//! Document statistics and per-block feature types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-document aggregate statistics.
///
/// Computed once per document and passed explicitly to the normalizer; it is
/// never cached or shared across documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Font size covering the largest number of characters
    pub dominant_font_size: f32,
    /// Number of distinct pages carrying blocks
    pub page_count: u32,
}

impl Default for DocumentStats {
    fn default() -> Self {
        Self {
            dominant_font_size: 1.0,
            page_count: 0,
        }
    }
}

/// Document-relative measurements for a single block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Block font size divided by the dominant font size
    pub relative_font_size: f32,
    /// Top edge normalized to [0, 1] within the block's page
    pub vertical_position: f32,
    /// Bold face
    pub is_bold: bool,
    /// Number of words
    pub word_count: usize,
    /// Set when the block was malformed and sentinel values were substituted
    pub low_confidence: bool,
}

impl FeatureVector {
    /// Create a feature vector with full confidence.
    pub fn new(
        relative_font_size: f32,
        vertical_position: f32,
        is_bold: bool,
        word_count: usize,
    ) -> Self {
        Self {
            relative_font_size,
            vertical_position,
            is_bold,
            word_count,
            low_confidence: false,
        }
    }
}

/// The literal classifier input: semantic tags in canonical order followed by
/// the (possibly truncated) block text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureString(String);

impl FeatureString {
    /// Wrap an already formatted feature string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading `[TAG]` tokens, in order.
    pub fn tags(&self) -> Vec<&str> {
        split_tags(&self.0).0
    }

    /// The block text after the tags.
    pub fn text(&self) -> &str {
        split_tags(&self.0).1
    }

    /// Check whether the tag prefix carries the given token (e.g. `[FONT_HIGH]`).
    ///
    /// Bracketed words inside the block text are never matched.
    pub fn has_tag(&self, token: &str) -> bool {
        self.tags().contains(&token)
    }
}

/// Split a feature string into its tag prefix and the block text.
///
/// Tags may be separated by whitespace. The prefix ends after the length tag,
/// which is always last, or at the first token that is not an upper-case
/// `[TAG]`.
fn split_tags(feature: &str) -> (Vec<&str>, &str) {
    let mut tags = Vec::new();
    let mut rest = feature;
    loop {
        let trimmed = rest.trim_start();
        let Some(end) = trimmed.strip_prefix('[').and_then(|t| t.find(']')) else {
            break;
        };
        let token = &trimmed[..end + 2];
        let name = &token[1..token.len() - 1];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
            break;
        }
        tags.push(token);
        rest = &trimmed[token.len()..];
        if name.starts_with("LEN_") {
            break;
        }
    }
    (tags, rest.trim())
}

impl fmt::Display for FeatureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FeatureString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
