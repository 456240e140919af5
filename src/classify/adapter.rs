//! Classifier adapter: batching, context windows, and per-block fallback.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;

use super::{Classifier, ClassifierRequest, Prediction};
use crate::error::{Error, Result};
use crate::model::{FeatureString, Label};

/// Default number of feature strings sent per classifier call.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Calls a [`Classifier`] and turns its output into one label per block.
///
/// The adapter never fails a document because of a single block: failed
/// calls are retried per block, and anything still missing or unparseable
/// becomes [`Label::P`].
#[derive(Clone)]
pub struct ClassifierAdapter {
    classifier: Arc<dyn Classifier>,
    batch_size: usize,
    context_window: bool,
}

impl ClassifierAdapter {
    /// Create an adapter with default batching and no context.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            batch_size: DEFAULT_BATCH_SIZE,
            context_window: false,
        }
    }

    /// Set the batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Enable or disable neighbour context in requests.
    pub fn with_context_window(mut self, enabled: bool) -> Self {
        self.context_window = enabled;
        self
    }

    /// The wrapped classifier.
    pub fn classifier(&self) -> Arc<dyn Classifier> {
        Arc::clone(&self.classifier)
    }

    /// Name of the wrapped classifier.
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Build requests for a document's feature strings.
    ///
    /// Context is taken from neighbouring feature strings only, so a
    /// request does not depend on where batch boundaries fall.
    pub fn requests(&self, features: &[FeatureString]) -> Vec<ClassifierRequest> {
        features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let mut req = ClassifierRequest::new(feature.clone());
                if self.context_window {
                    req.previous = i.checked_sub(1).map(|p| features[p].clone());
                    req.next = features.get(i + 1).cloned();
                }
                req
            })
            .collect()
    }

    /// Label every feature string, in order.
    pub fn classify(&self, features: &[FeatureString]) -> Vec<Label> {
        let requests = self.requests(features);
        let mut labels = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(self.batch_size) {
            labels.extend(classify_batch(self.classifier.as_ref(), chunk));
        }
        labels
    }

    /// Label every feature string, failing with
    /// [`Error::DocumentTimeout`] if the whole document takes longer than
    /// `budget`.
    ///
    /// Classification runs on a worker thread that streams batch results
    /// back; on timeout the worker is abandoned and stops at its next send.
    pub fn classify_with_budget(
        &self,
        document: &str,
        features: &[FeatureString],
        budget: Duration,
    ) -> Result<Vec<Label>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let requests = self.requests(features);
        let total = requests.len();
        let classifier = Arc::clone(&self.classifier);
        let batch_size = self.batch_size;
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<Label>>();

        let deadline = Instant::now() + budget;
        std::thread::Builder::new()
            .name(format!("classify-{}", document))
            .spawn(move || {
                for chunk in requests.chunks(batch_size) {
                    let labels = classify_batch(classifier.as_ref(), chunk);
                    if tx.send(labels).is_err() {
                        break;
                    }
                }
            })?;

        let mut labels = Vec::with_capacity(total);
        while labels.len() < total {
            match rx.recv_deadline(deadline) {
                Ok(batch) => labels.extend(batch),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "Document {}: classification timed out after {} of {} blocks",
                        document,
                        labels.len(),
                        total
                    );
                    return Err(Error::DocumentTimeout {
                        document: document.to_string(),
                        budget_ms: budget.as_millis() as u64,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    log::warn!(
                        "Document {}: classifier worker stopped; labelling {} remaining blocks P",
                        document,
                        total - labels.len()
                    );
                    labels.resize(total, Label::P);
                }
            }
        }

        Ok(labels)
    }
}

/// Classify one batch, retrying per request when the batch call fails.
///
/// A panicking classifier counts as a failed call.
fn classify_batch(classifier: &dyn Classifier, batch: &[ClassifierRequest]) -> Vec<Label> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| classifier.classify(batch)))
        .unwrap_or_else(|payload| {
            Err(Error::ClassifierUnavailable(format!(
                "classifier panicked: {}",
                panic_message(&*payload)
            )))
        });

    match result {
        Ok(predictions) => parse_predictions(classifier.name(), batch, predictions),
        Err(e) if batch.len() > 1 => {
            log::debug!(
                "{}: batch of {} failed ({}); retrying per block",
                classifier.name(),
                batch.len(),
                e
            );
            batch
                .iter()
                .flat_map(|req| classify_batch(classifier, std::slice::from_ref(req)))
                .collect()
        }
        Err(e) => {
            log::warn!(
                "{}: {}; labelling block P: {}",
                classifier.name(),
                Error::ClassifierUnavailable(e.to_string()),
                batch[0].feature
            );
            vec![Label::P]
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

fn parse_predictions(
    name: &str,
    batch: &[ClassifierRequest],
    predictions: Vec<Prediction>,
) -> Vec<Label> {
    if predictions.len() != batch.len() {
        log::warn!(
            "{}: expected {} predictions, got {}; missing blocks labelled P",
            name,
            batch.len(),
            predictions.len()
        );
    }

    let mut labels: Vec<Label> = predictions
        .into_iter()
        .take(batch.len())
        .map(|p| {
            p.label.parse().unwrap_or_else(|_| {
                log::warn!("{}: malformed label {:?}; using P", name, p.label);
                Label::P
            })
        })
        .collect();
    labels.resize(batch.len(), Label::P);
    labels
}
