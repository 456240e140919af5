//! The outline pipeline: filter, normalize, tag, classify, assemble.
//!
//! [`Outliner`] owns one configured instance of every stage and runs a
//! document through them in order. Stages share no mutable state, so a
//! single `Outliner` serves any number of documents concurrently.

mod batch;
mod options;

pub use batch::{BatchReport, DocumentFailure};
pub use options::OutlineOptions;

use std::sync::Arc;

use crate::assemble::Assembler;
use crate::classify::{Classifier, ClassifierAdapter};
use crate::error::{Error, Result};
use crate::filter::BlockFilter;
use crate::model::{
    DocumentInput, DocumentOutline, DocumentStats, FeatureString, FeatureVector, LabeledBlock,
    TextBlock,
};
use crate::normalize::{compute_stats, normalize_with_stats};
use crate::tagger::Tagger;

/// Runs documents through the outline pipeline.
pub struct Outliner {
    options: OutlineOptions,
    filter: BlockFilter,
    tagger: Tagger,
    adapter: ClassifierAdapter,
}

impl Outliner {
    /// Create an outliner with default options.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self::build(classifier, OutlineOptions::default())
    }

    /// Replace the options.
    pub fn with_options(self, options: OutlineOptions) -> Self {
        let classifier = self.adapter.classifier();
        Self::build(classifier, options)
    }

    fn build(classifier: Arc<dyn Classifier>, options: OutlineOptions) -> Self {
        Self {
            filter: BlockFilter::new(options.filter.clone()),
            tagger: Tagger::new(options.profile.clone()),
            adapter: ClassifierAdapter::new(classifier)
                .with_batch_size(options.batch_size)
                .with_context_window(options.context_window),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Feature vectors and feature strings of the blocks that survive
    /// filtering, in reading order.
    ///
    /// Statistics are taken over every block of the document, so filtering
    /// never shifts the dominant font size.
    pub fn features(&self, doc: &DocumentInput) -> Vec<(FeatureVector, FeatureString)> {
        let stats = compute_stats(&doc.blocks);
        let blocks = self.filter.apply(&doc.blocks);
        self.featurize(&blocks, &stats)
    }

    /// Label every block that survives filtering.
    pub fn label(&self, doc: &DocumentInput) -> Result<Vec<LabeledBlock>> {
        self.options.validate()?;

        let stats = compute_stats(&doc.blocks);
        let blocks = self.filter.apply(&doc.blocks);
        let (vectors, strings): (Vec<_>, Vec<_>) =
            self.featurize(&blocks, &stats).into_iter().unzip();

        let labels = match self.options.time_budget {
            Some(budget) => {
                self.adapter
                    .classify_with_budget(display_id(doc), &strings, budget)?
            }
            None => self.adapter.classify(&strings),
        };

        Ok(blocks
            .into_iter()
            .zip(vectors)
            .zip(labels)
            .map(|((block, features), label)| LabeledBlock::new(block, features, label))
            .collect())
    }

    /// Build the outline of one document.
    ///
    /// Malformed blocks and classifier failures are absorbed; only a time
    /// budget overrun or invalid options fail the document.
    pub fn process(&self, doc: &DocumentInput) -> Result<DocumentOutline> {
        let labeled = self.label(doc)?;

        if doc.is_empty() {
            log::warn!("{}", Error::EmptyDocument(display_id(doc).to_string()));
        } else if labeled.is_empty() {
            log::warn!(
                "Document {}: all {} blocks were filtered out",
                display_id(doc),
                doc.blocks.len()
            );
        }

        let assembler = Assembler::new().with_fallback_title(self.fallback_title(doc));
        let nodes = assembler.assemble(&labeled);

        log::debug!(
            "Document {}: {} blocks, {} outline nodes ({})",
            display_id(doc),
            doc.blocks.len(),
            nodes.len(),
            self.adapter.classifier_name()
        );

        Ok(DocumentOutline::from_nodes(nodes))
    }

    fn featurize(
        &self,
        blocks: &[TextBlock],
        stats: &DocumentStats,
    ) -> Vec<(FeatureVector, FeatureString)> {
        normalize_with_stats(blocks, stats)
            .into_iter()
            .zip(blocks)
            .map(|(vector, block)| {
                let feature = self.tagger.tag(&vector, &block.text);
                (vector, feature)
            })
            .collect()
    }

    fn fallback_title(&self, doc: &DocumentInput) -> String {
        doc.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.options.fallback_title)
            .to_string()
    }
}

fn display_id(doc: &DocumentInput) -> &str {
    if doc.id.is_empty() {
        "<unnamed>"
    } else {
        &doc.id
    }
}
