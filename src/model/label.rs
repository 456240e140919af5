//! Classifier labels and labeled blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{FeatureVector, TextBlock};
use crate::error::Error;

/// A block label predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Document title
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Body text
    P,
}

impl Label {
    /// All labels in vocabulary order.
    pub const ALL: [Label; 5] = [Label::Title, Label::H1, Label::H2, Label::H3, Label::P];

    /// Label name as emitted by the classifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Title => "Title",
            Label::H1 => "H1",
            Label::H2 => "H2",
            Label::H3 => "H3",
            Label::P => "P",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Label::Title),
            "h1" => Ok(Label::H1),
            "h2" => Ok(Label::H2),
            "h3" => Ok(Label::H3),
            "p" | "paragraph" | "body" => Ok(Label::P),
            other => Err(Error::Other(format!("Unknown label: {:?}", other))),
        }
    }
}

/// A text block together with its features and predicted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBlock {
    /// The source block
    pub block: TextBlock,
    /// Normalized features of the block
    pub features: FeatureVector,
    /// Predicted label
    pub label: Label,
}

impl LabeledBlock {
    /// Create a labeled block.
    pub fn new(block: TextBlock, features: FeatureVector, label: Label) -> Self {
        Self {
            block,
            features,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!("Title".parse::<Label>().unwrap(), Label::Title);
        assert_eq!("h2".parse::<Label>().unwrap(), Label::H2);
        assert_eq!(" H3 ".parse::<Label>().unwrap(), Label::H3);
        assert_eq!("Paragraph".parse::<Label>().unwrap(), Label::P);
        assert!("H4".parse::<Label>().is_err());
        assert!("".parse::<Label>().is_err());
    }

    #[test]
    fn test_label_display_roundtrip() {
        for label in Label::ALL {
            assert_eq!(label.to_string().parse::<Label>().unwrap(), label);
        }
    }
}
