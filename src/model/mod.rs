//! Data model for the outline pipeline.
//!
//! These types carry a document from extracted text blocks, through
//! normalized features and classifier labels, to the final outline.

mod block;
mod document;
mod features;
mod label;
mod outline;

pub use block::{BoundingBox, TextBlock, LETTER_HEIGHT};
pub use document::DocumentInput;
pub use features::{DocumentStats, FeatureString, FeatureVector};
pub use label::{Label, LabeledBlock};
pub use outline::{DocumentOutline, HeadingLevel, OutlineNode};
