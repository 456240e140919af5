//! # pdf-outline
//!
//! Hierarchical outline extraction from PDF text blocks.
//!
//! This library takes the styled text blocks of a PDF page layout and
//! produces the document's outline: one title plus an ordered list of
//! H1/H2/H3 headings with their page numbers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{outline_file, render, JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     // Outline a blocks file with the built-in rule classifier
//!     let outline = outline_file("file01.json")?;
//!
//!     // Serialize to JSON
//!     let json = render::to_json(&outline, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Normalize**: font size relative to the document's dominant size,
//!   vertical position relative to the page
//! - **Tag**: bucket the features into `[STYLE_BOLD][FONT_HIGH][POS_TOP][LEN_SHORT]`
//!   style tokens and prepend them to the text
//! - **Classify**: label each block Title/H1/H2/H3/P through a pluggable
//!   [`Classifier`]
//! - **Assemble**: keep headings, resolve exactly one title, merge duplicates
//!
//! Documents are processed in parallel with Rayon; each document can be
//! given a classification time budget.

pub mod assemble;
pub mod classify;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod tagger;

// Re-export commonly used types
pub use assemble::Assembler;
pub use classify::{
    Classifier, ClassifierAdapter, ClassifierRequest, FnClassifier, Prediction,
    RuleBasedClassifier,
};
pub use error::{Error, Result};
pub use filter::{BlockFilter, FilterOptions, FilterPreset};
pub use model::{
    BoundingBox, DocumentInput, DocumentOutline, DocumentStats, FeatureString, FeatureVector,
    HeadingLevel, Label, LabeledBlock, OutlineNode, TextBlock,
};
pub use normalize::compute_stats;
pub use pipeline::{BatchReport, DocumentFailure, OutlineOptions, Outliner};
pub use render::JsonFormat;
pub use tagger::{Tagger, ThresholdProfile};

use std::path::Path;
use std::sync::Arc;

/// Build the outline of a document with the rule-based classifier.
///
/// # Example
///
/// ```
/// use pdf_outline::{extract_outline, DocumentInput, TextBlock};
///
/// let doc = DocumentInput::new(
///     "report",
///     vec![
///         TextBlock::new("Annual Report", 1, 24.0).bold().at(40.0),
///         TextBlock::new("Body text of ordinary size running across the page.", 1, 11.0)
///             .at(200.0),
///     ],
/// );
/// let outline = extract_outline(&doc).unwrap();
/// assert_eq!(outline.title, "Annual Report");
/// ```
pub fn extract_outline(doc: &DocumentInput) -> Result<DocumentOutline> {
    extract_outline_with_options(doc, OutlineOptions::default())
}

/// Build the outline of a document with the rule-based classifier and
/// custom options.
pub fn extract_outline_with_options(
    doc: &DocumentInput,
    options: OutlineOptions,
) -> Result<DocumentOutline> {
    OutlineBuilder::new().with_options(options).build().process(doc)
}

/// Read a blocks JSON file and build its outline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::outline_file;
///
/// let outline = outline_file("file01.json").unwrap();
/// println!("{}", outline.title);
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let doc = render::read_document(path)?;
    extract_outline(&doc)
}

/// Parse blocks JSON and build its outline.
pub fn outline_json(json: &str) -> Result<DocumentOutline> {
    let doc = DocumentInput::from_json(json)?;
    extract_outline(&doc)
}

/// Builder for a configured [`Outliner`].
///
/// # Example
///
/// ```
/// use pdf_outline::{FilterPreset, OutlineBuilder};
/// use std::time::Duration;
///
/// let outliner = OutlineBuilder::new()
///     .with_filter(FilterPreset::Standard)
///     .with_time_budget(Duration::from_secs(2))
///     .sequential()
///     .build();
/// assert!(!outliner.options().parallel);
/// ```
pub struct OutlineBuilder {
    classifier: Option<Arc<dyn Classifier>>,
    options: OutlineOptions,
}

impl OutlineBuilder {
    /// Create a builder using the rule-based classifier and default options.
    pub fn new() -> Self {
        Self {
            classifier: None,
            options: OutlineOptions::default(),
        }
    }

    /// Use a specific classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the threshold profile.
    pub fn with_profile(mut self, profile: ThresholdProfile) -> Self {
        self.options = self.options.with_profile(profile);
        self
    }

    /// Set the filter preset.
    pub fn with_filter(mut self, preset: FilterPreset) -> Self {
        self.options = self.options.with_filter_preset(preset);
        self
    }

    /// Set the classifier batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.options = self.options.with_batch_size(batch_size);
        self
    }

    /// Send neighbouring feature strings with each request.
    pub fn with_context_window(mut self) -> Self {
        self.options = self.options.with_context_window(true);
        self
    }

    /// Set the per-document classification budget.
    pub fn with_time_budget(mut self, budget: std::time::Duration) -> Self {
        self.options = self.options.with_time_budget(budget);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Build the outliner.
    pub fn build(self) -> Outliner {
        let classifier = self
            .classifier
            .unwrap_or_else(|| Arc::new(RuleBasedClassifier::new()));
        Outliner::new(classifier).with_options(self.options)
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
