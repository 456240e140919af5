//! Outline assembly: labeled blocks to an ordered list of outline nodes.
//!
//! The assembler walks the label stream once, in reading order. It only
//! filters and relabels; it never moves a block.
//!
//! - Exactly one Title survives. Among several Title labels the block with
//!   the largest relative font size wins (ties: earliest page, then highest
//!   on the page, then first seen); the rest become H1.
//! - With no Title label at all, the largest-font block on the first page is
//!   relabelled Title.
//! - Heading levels are taken as predicted; an H3 may follow an H1.
//! - A heading whose normalized text repeats the previous heading on the same
//!   page is merged into it.
//! - `P` blocks are dropped.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::model::{HeadingLevel, Label, LabeledBlock, OutlineNode};

/// Title used when a document has no blocks at all.
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled";

/// Builds outlines from labeled blocks.
#[derive(Debug, Clone)]
pub struct Assembler {
    fallback_title: String,
}

impl Assembler {
    /// Create an assembler with the default fallback title.
    pub fn new() -> Self {
        Self {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }

    /// Set the title used for documents without blocks.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Assemble the outline of one document.
    ///
    /// The result always contains exactly one [`HeadingLevel::Title`] node.
    pub fn assemble(&self, blocks: &[LabeledBlock]) -> Vec<OutlineNode> {
        if blocks.is_empty() {
            log::debug!("No blocks; synthesizing title {:?}", self.fallback_title);
            return vec![OutlineNode::new(
                HeadingLevel::Title,
                self.fallback_title.clone(),
                1,
            )];
        }

        let labels = resolve_title(blocks);

        let mut nodes: Vec<OutlineNode> = Vec::new();
        let mut last_key: Option<String> = None;
        let mut last_level: Option<HeadingLevel> = None;

        for (block, label) in blocks.iter().zip(labels) {
            let Some(level) = HeadingLevel::from_label(label) else {
                continue;
            };
            let text = block.block.text.trim();
            let page = block.block.page_number;
            let key = normalize_heading_text(text);

            if let (Some(prev), Some(prev_key)) = (nodes.last_mut(), last_key.as_ref()) {
                if prev.page_number == page && *prev_key == key {
                    log::debug!("Merging duplicate heading {:?} on page {}", text, page);
                    if level == HeadingLevel::Title {
                        prev.level = HeadingLevel::Title;
                    }
                    continue;
                }
            }

            if let Some(prev) = last_level {
                if level > prev && level.depth() > prev.depth() + 1 {
                    log::debug!("Accepting level jump {} -> {} at {:?}", prev, level, text);
                }
            }

            nodes.push(OutlineNode::new(level, text, page));
            last_key = Some(key);
            last_level = Some(level);
        }

        nodes
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Labels after Title resolution: exactly one Title, in place.
fn resolve_title(blocks: &[LabeledBlock]) -> Vec<Label> {
    let mut labels: Vec<Label> = blocks.iter().map(|b| b.label).collect();

    let titles: Vec<usize> = (0..blocks.len())
        .filter(|&i| labels[i] == Label::Title)
        .collect();

    let chosen = if titles.is_empty() {
        let first_page = blocks
            .iter()
            .map(|b| b.block.page_number)
            .min()
            .unwrap_or(1);
        let candidates: Vec<usize> = (0..blocks.len())
            .filter(|&i| blocks[i].block.page_number == first_page)
            .collect();
        let chosen = best_candidate(blocks, &candidates);
        log::debug!(
            "No Title label; promoting {:?} ({})",
            blocks[chosen].block.text,
            labels[chosen]
        );
        chosen
    } else {
        best_candidate(blocks, &titles)
    };

    for &i in &titles {
        if i != chosen {
            log::debug!("Demoting extra Title {:?} to H1", blocks[i].block.text);
            labels[i] = Label::H1;
        }
    }
    labels[chosen] = Label::Title;
    labels
}

/// Largest relative font size; ties by page, then vertical position, then
/// reading order. `candidates` must be non-empty and ascending.
fn best_candidate(blocks: &[LabeledBlock], candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if compare_title_rank(&blocks[i], &blocks[best]) == Ordering::Greater {
            best = i;
        }
    }
    best
}

fn compare_title_rank(a: &LabeledBlock, b: &LabeledBlock) -> Ordering {
    a.features
        .relative_font_size
        .total_cmp(&b.features.relative_font_size)
        .then_with(|| b.block.page_number.cmp(&a.block.page_number))
        .then_with(|| {
            b.features
                .vertical_position
                .total_cmp(&a.features.vertical_position)
        })
}

/// Comparison key for duplicate detection: NFKC, lowercase, single spaces.
pub fn normalize_heading_text(text: &str) -> String {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, TextBlock};

    fn lb(text: &str, page: u32, rfs: f32, pos: f32, label: Label) -> LabeledBlock {
        LabeledBlock::new(
            TextBlock::new(text, page, 12.0 * rfs),
            FeatureVector::new(rfs, pos, false, text.split_whitespace().count()),
            label,
        )
    }

    fn levels(nodes: &[OutlineNode]) -> Vec<HeadingLevel> {
        nodes.iter().map(|n| n.level).collect()
    }

    #[test]
    fn test_single_title_block() {
        let nodes = Assembler::new().assemble(&[lb("Report", 1, 2.0, 0.05, Label::Title)]);
        assert_eq!(nodes, vec![OutlineNode::new(HeadingLevel::Title, "Report", 1)]);
    }

    #[test]
    fn test_empty_document_gets_fallback_title() {
        let nodes = Assembler::new().with_fallback_title("file02").assemble(&[]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].level, HeadingLevel::Title);
        assert_eq!(nodes[0].text, "file02");
        assert_eq!(nodes[0].page_number, 1);
    }

    #[test]
    fn test_largest_title_wins_and_others_demoted() {
        let blocks = vec![
            lb("Main Title", 1, 2.0, 0.1, Label::Title),
            lb("Second Title", 2, 1.8, 0.1, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(levels(&nodes), vec![HeadingLevel::Title, HeadingLevel::H1]);
        assert_eq!(nodes[0].text, "Main Title");
        assert_eq!(nodes[1].text, "Second Title");
    }

    #[test]
    fn test_later_larger_title_wins_in_place() {
        let blocks = vec![
            lb("Small", 1, 1.5, 0.1, Label::Title),
            lb("Large", 1, 2.5, 0.3, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(levels(&nodes), vec![HeadingLevel::H1, HeadingLevel::Title]);
        assert_eq!(nodes[1].text, "Large");
    }

    #[test]
    fn test_title_tie_breaks() {
        // Same size: earlier page wins.
        let blocks = vec![
            lb("Page two", 2, 2.0, 0.1, Label::Title),
            lb("Page three", 3, 2.0, 0.0, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes[0].level, HeadingLevel::Title);

        // Same size and page: higher on the page wins.
        let blocks = vec![
            lb("Lower", 1, 2.0, 0.4, Label::Title),
            lb("Higher", 1, 2.0, 0.1, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes[1].level, HeadingLevel::Title);

        // Full tie: first seen wins.
        let blocks = vec![
            lb("First", 1, 2.0, 0.1, Label::Title),
            lb("Second", 1, 2.0, 0.1, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes[0].level, HeadingLevel::Title);
        assert_eq!(nodes[1].level, HeadingLevel::H1);
    }

    #[test]
    fn test_paragraphs_dropped_and_levels_kept() {
        let blocks = vec![
            lb("Doc", 1, 2.0, 0.05, Label::Title),
            lb("Intro", 1, 1.5, 0.2, Label::H1),
            lb("Body text here", 1, 1.0, 0.3, Label::P),
            lb("Detail", 1, 1.1, 0.5, Label::H3),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(
            levels(&nodes),
            vec![HeadingLevel::Title, HeadingLevel::H1, HeadingLevel::H3]
        );
    }

    #[test]
    fn test_no_headings_promotes_largest_first_page_block() {
        let blocks = vec![
            lb("small print", 1, 0.8, 0.02, Label::P),
            lb("Big Opening Line", 1, 1.6, 0.2, Label::P),
            lb("Even bigger on page two", 2, 3.0, 0.1, Label::P),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes, vec![OutlineNode::new(HeadingLevel::Title, "Big Opening Line", 1)]);
    }

    #[test]
    fn test_no_title_label_relabels_heading() {
        let blocks = vec![
            lb("Overview", 1, 1.8, 0.1, Label::H1),
            lb("Scope", 1, 1.3, 0.4, Label::H2),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(levels(&nodes), vec![HeadingLevel::Title, HeadingLevel::H2]);
        assert_eq!(nodes[0].text, "Overview");
    }

    #[test]
    fn test_first_page_is_lowest_page_number() {
        let blocks = vec![
            lb("On page three", 3, 1.2, 0.1, Label::P),
            lb("On page three too", 3, 1.1, 0.2, Label::H2),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes[0].level, HeadingLevel::Title);
        assert_eq!(nodes[0].text, "On page three");
        assert_eq!(nodes[0].page_number, 3);
    }

    #[test]
    fn test_consecutive_duplicates_merged() {
        let blocks = vec![
            lb("Doc", 1, 2.0, 0.05, Label::Title),
            lb("Results", 2, 1.5, 0.1, Label::H1),
            lb("  RESULTS ", 2, 1.5, 0.12, Label::H2),
            lb("Results", 3, 1.5, 0.1, Label::H1),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(
            levels(&nodes),
            vec![HeadingLevel::Title, HeadingLevel::H1, HeadingLevel::H1]
        );
        assert_eq!(nodes[1].page_number, 2);
        assert_eq!(nodes[2].page_number, 3);
    }

    #[test]
    fn test_duplicates_separated_by_paragraph_still_merge() {
        let blocks = vec![
            lb("Doc", 1, 2.0, 0.05, Label::Title),
            lb("Methods", 1, 1.5, 0.2, Label::H1),
            lb("some body text", 1, 1.0, 0.3, Label::P),
            lb("Methods", 1, 1.5, 0.4, Label::H1),
        ];
        assert_eq!(Assembler::new().assemble(&blocks).len(), 2);
    }

    #[test]
    fn test_non_consecutive_duplicates_kept() {
        let blocks = vec![
            lb("Doc", 1, 2.0, 0.05, Label::Title),
            lb("Notes", 1, 1.5, 0.2, Label::H1),
            lb("Other", 1, 1.5, 0.3, Label::H2),
            lb("Notes", 1, 1.5, 0.4, Label::H1),
        ];
        assert_eq!(Assembler::new().assemble(&blocks).len(), 4);
    }

    #[test]
    fn test_title_duplicating_previous_heading_keeps_title() {
        let blocks = vec![
            lb("Handbook", 1, 1.5, 0.05, Label::H1),
            lb("Handbook", 1, 2.0, 0.08, Label::Title),
        ];
        let nodes = Assembler::new().assemble(&blocks);
        assert_eq!(nodes, vec![OutlineNode::new(HeadingLevel::Title, "Handbook", 1)]);
    }

    #[test]
    fn test_normalize_heading_text() {
        assert_eq!(normalize_heading_text("  Hello   World "), "hello world");
        assert_eq!(normalize_heading_text("\u{FB01}nal"), "final");
    }
}
