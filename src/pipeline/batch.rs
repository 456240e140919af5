//! Batch processing of many documents.

use rayon::prelude::*;

use super::Outliner;
use crate::error::{Error, Result};
use crate::model::{DocumentInput, DocumentOutline};

/// A document that could not be outlined.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    /// Document identifier
    pub id: String,
    /// Why it failed
    pub reason: String,
    /// Whether the failure was a time budget overrun
    pub timed_out: bool,
}

impl DocumentFailure {
    fn new(id: &str, error: &Error) -> Self {
        Self {
            id: id.to_string(),
            reason: error.to_string(),
            timed_out: matches!(error, Error::DocumentTimeout { .. }),
        }
    }
}

/// Results of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Outlines of the documents that succeeded, keyed by document id
    pub outlines: Vec<(String, DocumentOutline)>,
    /// Documents that failed
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Number of documents processed.
    pub fn total(&self) -> usize {
        self.outlines.len() + self.failures.len()
    }

    /// Check if every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if the batch was non-empty and no document succeeded.
    pub fn all_failed(&self) -> bool {
        self.outlines.is_empty() && !self.failures.is_empty()
    }

    /// Look up an outline by document id.
    pub fn outline(&self, id: &str) -> Option<&DocumentOutline> {
        self.outlines
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, outline)| outline)
    }
}

impl Outliner {
    /// Outline a batch of documents.
    ///
    /// Documents are independent: one failing or timing out does not affect
    /// the others.
    pub fn process_batch(&self, documents: &[DocumentInput]) -> BatchReport {
        self.process_batch_with_progress(documents, || {})
    }

    /// Outline a batch of documents, calling `on_done` after each one.
    pub fn process_batch_with_progress<F>(
        &self,
        documents: &[DocumentInput],
        on_done: F,
    ) -> BatchReport
    where
        F: Fn() + Sync,
    {
        let run = |doc: &DocumentInput| {
            let result = self.process(doc);
            on_done();
            result
        };

        let results: Vec<Result<DocumentOutline>> = if self.options.parallel {
            documents.par_iter().map(run).collect()
        } else {
            documents.iter().map(run).collect()
        };

        let mut report = BatchReport::default();
        for (doc, result) in documents.iter().zip(results) {
            match result {
                Ok(outline) => report.outlines.push((doc.id.clone(), outline)),
                Err(e) => {
                    log::warn!("Document {} failed: {}", doc.id, e);
                    report.failures.push(DocumentFailure::new(&doc.id, &e));
                }
            }
        }

        log::info!(
            "Outlined {} of {} documents",
            report.outlines.len(),
            report.total()
        );
        report
    }
}
