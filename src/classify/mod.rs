//! Classifier boundary.
//!
//! The block classifier is an external collaborator. This module defines the
//! capability it must provide ([`Classifier`]), the adapter that calls it
//! ([`ClassifierAdapter`]), and two in-process implementations: a rule-based
//! fallback and a closure wrapper.
//!
//! # Example
//!
//! ```
//! use pdf_outline::classify::{ClassifierAdapter, FnClassifier, Prediction};
//! use pdf_outline::model::{FeatureString, Label};
//! use std::sync::Arc;
//!
//! let classifier = FnClassifier::new("upper", |req| {
//!     let label = if req.feature.has_tag("[FONT_HIGH]") { "H1" } else { "P" };
//!     Ok(Prediction::new(label))
//! });
//! let adapter = ClassifierAdapter::new(Arc::new(classifier));
//!
//! let labels = adapter.classify(&[
//!     FeatureString::new("[FONT_HIGH][POS_TOP][LEN_SHORT] Scope"),
//!     FeatureString::new("[FONT_LOW][POS_MID][LEN_LONG] Body text"),
//! ]);
//! assert_eq!(labels, vec![Label::H1, Label::P]);
//! ```

mod adapter;
mod rules;

pub use adapter::{ClassifierAdapter, DEFAULT_BATCH_SIZE};
pub use rules::RuleBasedClassifier;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::FeatureString;

/// One classifier input: a feature string plus optional neighbour context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierRequest {
    /// Feature string of the block to label
    pub feature: FeatureString,

    /// Feature string of the preceding block in reading order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<FeatureString>,

    /// Feature string of the following block in reading order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<FeatureString>,
}

impl ClassifierRequest {
    /// Create a request without context.
    pub fn new(feature: FeatureString) -> Self {
        Self {
            feature,
            previous: None,
            next: None,
        }
    }
}

/// A raw classifier prediction. The label is parsed by the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Label text as produced by the model
    pub label: String,
}

impl Prediction {
    /// Create a prediction.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Capability required of a block classifier.
///
/// Implementations must be deterministic for identical input, stateless
/// across calls, and return one prediction per request in request order.
/// A single instance is shared read-only by every document in a batch.
pub trait Classifier: Send + Sync {
    /// Name of this classifier, for logging.
    fn name(&self) -> &str;

    /// Label a batch of requests.
    fn classify(&self, batch: &[ClassifierRequest]) -> Result<Vec<Prediction>>;
}

/// Adapts a per-request closure into a [`Classifier`].
///
/// A failing request fails the whole batch call; the adapter then retries
/// the batch one request at a time.
pub struct FnClassifier<F> {
    name: String,
    f: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&ClassifierRequest) -> Result<Prediction> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Classifier for FnClassifier<F>
where
    F: Fn(&ClassifierRequest) -> Result<Prediction> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(&self, batch: &[ClassifierRequest]) -> Result<Vec<Prediction>> {
        batch.iter().map(|req| (self.f)(req)).collect()
    }
}
