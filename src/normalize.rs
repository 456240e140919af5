//! Block normalization: raw block measurements to document-relative features.
//!
//! Font sizes are bucketed at 0.1pt precision. The dominant size is the
//! bucket covering the most characters; ties go to the smaller size so that
//! body text wins over a few large headings.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Error;
use crate::model::{DocumentStats, FeatureVector, TextBlock};

/// Font size substituted for blocks whose size is missing or invalid.
pub const MIN_FONT_SIZE: f32 = 1.0;

/// Vertical position substituted when a block's geometry is unusable.
const FALLBACK_POSITION: f32 = 0.5;

/// Character-weighted histogram of font sizes.
#[derive(Debug, Clone, Default)]
pub struct FontHistogram {
    /// Character count per font size (key = size * 10, rounded)
    buckets: BTreeMap<i32, usize>,
}

impl FontHistogram {
    /// Build a histogram over the valid font sizes of `blocks`.
    pub fn from_blocks(blocks: &[TextBlock]) -> Self {
        let mut histogram = Self::default();
        for block in blocks {
            if let Some(size) = block.valid_font_size() {
                histogram.add(size, block.char_count());
            }
        }
        histogram
    }

    /// Add `chars` characters set at `size`.
    pub fn add(&mut self, size: f32, chars: usize) {
        if chars == 0 {
            return;
        }
        let key = (size * 10.0).round() as i32;
        *self.buckets.entry(key).or_insert(0) += chars;
    }

    /// Font size with the largest character count, smallest size on ties.
    pub fn dominant(&self) -> Option<f32> {
        let mut best: Option<(i32, usize)> = None;
        // Ascending key order, so only a strictly larger count replaces.
        for (&key, &count) in &self.buckets {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key as f32 / 10.0)
    }

    /// Character-weighted mean font size.
    pub fn weighted_mean(&self) -> Option<f32> {
        let total: usize = self.buckets.values().sum();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .buckets
            .iter()
            .map(|(&key, &count)| key as f64 / 10.0 * count as f64)
            .sum();
        Some((weighted / total as f64) as f32)
    }

}

/// Compute the statistics of one document.
pub fn compute_stats(blocks: &[TextBlock]) -> DocumentStats {
    let dominant_font_size = FontHistogram::from_blocks(blocks)
        .dominant()
        .unwrap_or(1.0);
    let page_count = blocks
        .iter()
        .map(|b| b.page_number)
        .collect::<BTreeSet<_>>()
        .len() as u32;

    DocumentStats {
        dominant_font_size,
        page_count,
    }
}

/// Normalize every block of a document.
pub fn normalize(blocks: &[TextBlock]) -> Vec<FeatureVector> {
    let stats = compute_stats(blocks);
    normalize_with_stats(blocks, &stats)
}

/// Normalize blocks against precomputed document statistics.
///
/// Malformed blocks are never dropped: sentinel values are substituted and
/// the resulting vector is flagged `low_confidence`.
pub fn normalize_with_stats(blocks: &[TextBlock], stats: &DocumentStats) -> Vec<FeatureVector> {
    let dominant = if stats.dominant_font_size.is_finite() && stats.dominant_font_size > 0.0 {
        stats.dominant_font_size
    } else {
        1.0
    };

    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| normalize_block(index, block, dominant))
        .collect()
}

fn normalize_block(index: usize, block: &TextBlock, dominant: f32) -> FeatureVector {
    let mut low_confidence = false;

    let font_size = match block.valid_font_size() {
        Some(size) => size,
        None => {
            report_malformed(index, format!("invalid font size {:?}", block.font_size));
            low_confidence = true;
            MIN_FONT_SIZE
        }
    };

    let vertical_position = match page_position(block) {
        Ok(pos) => pos,
        Err(reason) => {
            report_malformed(index, reason);
            low_confidence = true;
            FALLBACK_POSITION
        }
    };

    FeatureVector {
        relative_font_size: font_size / dominant,
        vertical_position,
        is_bold: block.is_bold,
        word_count: block.word_count(),
        low_confidence,
    }
}

/// Top edge relative to the block's own page, clamped to [0, 1].
fn page_position(block: &TextBlock) -> Result<f32, String> {
    let bbox = block
        .bounding_box
        .ok_or_else(|| "missing bounding box".to_string())?;
    let height = block.page_height;
    if !bbox.is_finite() || !height.is_finite() || height <= 0.0 {
        return Err(format!(
            "unusable geometry (top {}, page height {})",
            bbox.top, height
        ));
    }
    Ok((bbox.top / height).clamp(0.0, 1.0))
}

fn report_malformed(index: usize, reason: String) {
    log::warn!("{}; substituting sentinel", Error::MalformedBlock { index, reason });
}
