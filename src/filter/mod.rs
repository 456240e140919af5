//! Pre-classification block filtering.
//!
//! Removes blocks that are almost never headings before they reach the
//! classifier: running headers and footers, long body paragraphs, small
//! plain text, and blocks without letters. Surviving blocks keep their
//! relative order.

mod cleanup;

pub use cleanup::TextCleaner;

use std::collections::{BTreeSet, HashMap};

use crate::model::TextBlock;
use crate::normalize::FontHistogram;

/// Filter preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPreset {
    /// No filtering: every block is classified
    #[default]
    Off,
    /// All filters enabled with standard thresholds
    Standard,
}

/// Options for block filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Remove text repeated across pages in the header/footer margins
    pub remove_headers_footers: bool,

    /// Fraction of pages a text must appear on to count as repeating
    pub repeat_ratio: f32,

    /// Height of the header and footer margins as a fraction of the page
    pub margin_ratio: f32,

    /// Remove blocks with more than `max_words` words
    pub remove_long_blocks: bool,

    /// Word limit for `remove_long_blocks`
    pub max_words: usize,

    /// Long blocks above this multiple of the mean font size are kept
    pub long_block_font_ratio: f32,

    /// Remove non-bold blocks at or below the mean font size in the
    /// majority color
    pub remove_small_plain: bool,

    /// Clean block text and remove blocks without letters
    pub clean_text: bool,
}

impl FilterOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: FilterPreset) -> Self {
        match preset {
            FilterPreset::Off => Self::off(),
            FilterPreset::Standard => Self::standard(),
        }
    }

    /// No filtering.
    pub fn off() -> Self {
        Self {
            remove_headers_footers: false,
            remove_long_blocks: false,
            remove_small_plain: false,
            clean_text: false,
            ..Self::standard()
        }
    }

    /// Standard filtering.
    pub fn standard() -> Self {
        Self {
            remove_headers_footers: true,
            repeat_ratio: 0.5,
            margin_ratio: 0.12,
            remove_long_blocks: true,
            max_words: 20,
            long_block_font_ratio: 1.5,
            remove_small_plain: true,
            clean_text: true,
        }
    }

    /// Check if any filter is enabled.
    pub fn is_enabled(&self) -> bool {
        self.remove_headers_footers
            || self.remove_long_blocks
            || self.remove_small_plain
            || self.clean_text
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::off()
    }
}

/// Applies [`FilterOptions`] to a document's blocks.
pub struct BlockFilter {
    options: FilterOptions,
    cleaner: TextCleaner,
}

impl BlockFilter {
    /// Create a filter.
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            cleaner: TextCleaner::new(),
        }
    }

    /// Create a filter from a preset.
    pub fn from_preset(preset: FilterPreset) -> Self {
        Self::new(FilterOptions::from_preset(preset))
    }

    /// Filter one document's blocks.
    pub fn apply(&self, blocks: &[TextBlock]) -> Vec<TextBlock> {
        if !self.options.is_enabled() {
            return blocks.to_vec();
        }

        let before = blocks.len();
        let mut kept: Vec<TextBlock> = blocks.to_vec();

        if self.options.remove_headers_footers {
            kept = self.remove_headers_footers(kept);
        }

        // Mean is taken after header/footer removal so running text does
        // not skew it.
        let mean = FontHistogram::from_blocks(&kept).weighted_mean();

        if let Some(mean) = mean {
            if self.options.remove_long_blocks {
                let limit = mean * self.options.long_block_font_ratio;
                kept.retain(|b| {
                    b.word_count() <= self.options.max_words
                        || b.valid_font_size().map_or(true, |s| s > limit)
                });
            }

            if self.options.remove_small_plain {
                let majority = majority_color(&kept);
                kept.retain(|b| {
                    b.valid_font_size().map_or(true, |s| s > mean)
                        || b.is_bold
                        || b.color != majority
                });
            }
        }

        if self.options.clean_text {
            kept = kept
                .into_iter()
                .filter_map(|mut b| {
                    let text = self.cleaner.clean(&b.text)?;
                    if b.word_count.is_some() {
                        b.word_count = Some(text.split_whitespace().count());
                    }
                    b.text = text;
                    Some(b)
                })
                .collect();
        }

        log::debug!("Block filter kept {} of {} blocks", kept.len(), before);
        kept
    }

    fn remove_headers_footers(&self, blocks: Vec<TextBlock>) -> Vec<TextBlock> {
        let repeating = repeating_texts(&blocks, self.options.repeat_ratio);
        if repeating.is_empty() {
            return blocks;
        }

        let margin = self.options.margin_ratio;
        blocks
            .into_iter()
            .filter(|b| {
                let Some(bbox) = b.bounding_box else {
                    return true;
                };
                if !repeating.contains(&b.text) || b.page_height <= 0.0 {
                    return true;
                }
                let top = bbox.top / b.page_height;
                let bottom = bbox.bottom / b.page_height;
                !(top < margin || bottom > 1.0 - margin)
            })
            .collect()
    }
}

impl Default for BlockFilter {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}

/// Texts appearing on at least `max(2, floor(pages * ratio))` distinct pages.
fn repeating_texts(blocks: &[TextBlock], ratio: f32) -> BTreeSet<String> {
    let mut pages_by_text: HashMap<&str, BTreeSet<u32>> = HashMap::new();
    for b in blocks {
        pages_by_text
            .entry(b.text.as_str())
            .or_default()
            .insert(b.page_number);
    }

    let page_count = blocks
        .iter()
        .map(|b| b.page_number)
        .collect::<BTreeSet<_>>()
        .len();
    let min_pages = ((page_count as f32 * ratio) as usize).max(2);

    pages_by_text
        .into_iter()
        .filter(|(_, pages)| pages.len() >= min_pages)
        .map(|(text, _)| text.to_string())
        .collect()
}

/// Most common color, first seen on ties.
fn majority_color(blocks: &[TextBlock]) -> Option<u32> {
    let mut counts: Vec<(Option<u32>, usize)> = Vec::new();
    for b in blocks {
        match counts.iter_mut().find(|(c, _)| *c == b.color) {
            Some((_, n)) => *n += 1,
            None => counts.push((b.color, 1)),
        }
    }

    let mut best: Option<(Option<u32>, usize)> = None;
    for (color, n) in counts {
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((color, n));
        }
    }
    best.and_then(|(color, _)| color)
}
