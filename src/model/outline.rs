//! Outline types: the terminal output of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Label;

/// Heading level of an outline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Document title
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Map a heading-class label to its level. `P` has no level.
    pub fn from_label(label: Label) -> Option<Self> {
        match label {
            Label::Title => Some(HeadingLevel::Title),
            Label::H1 => Some(HeadingLevel::H1),
            Label::H2 => Some(HeadingLevel::H2),
            Label::H3 => Some(HeadingLevel::H3),
            Label::P => None,
        }
    }

    /// Numeric depth (Title = 0).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level name as written to JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::Title => "Title",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single heading entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    #[serde(rename = "page")]
    pub page_number: u32,
}

impl OutlineNode {
    /// Create a new outline node.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page_number: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page_number,
        }
    }
}

/// Serialized outline of one document: the title plus the ordered headings
/// below it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,

    /// Headings (H1-H3) in reading order
    pub outline: Vec<OutlineNode>,
}

impl DocumentOutline {
    /// Create an outline with a title and no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Split assembled nodes into the title and the remaining headings.
    ///
    /// The first Title node provides the title; any other node keeps its
    /// position in the outline.
    pub fn from_nodes(nodes: Vec<OutlineNode>) -> Self {
        let mut outline = Self::new(String::new());
        let mut has_title = false;

        for node in nodes {
            if node.level == HeadingLevel::Title && !has_title {
                outline.title = node.text;
                has_title = true;
            } else {
                outline.add_node(node);
            }
        }

        outline
    }

    /// Add a heading.
    pub fn add_node(&mut self, node: OutlineNode) {
        self.outline.push(node);
    }

    /// Check if the outline has no headings below the title.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Count headings at a level.
    pub fn count(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|n| n.level == level).count()
    }
}
