// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Classification accuracy of the generator/classifier on a
// held-out loader. The predicted digit of an image is the
// argmax of its probability row.
//
// Runs on the inner (non-autodiff) backend: callers pass
// `classifier.valid()` so no gradient graph is recorded.

use burn::{
    data::dataloader::DataLoader,
    prelude::*,
};

use crate::data::batcher::DigitBatch;
use crate::ml::model::Classifier;

/// Running tally of correct predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total:   usize,
}

impl Accuracy {
    /// Fraction correct in [0, 1]; 0 when nothing was evaluated.
    pub fn ratio(&self) -> f64 {
        if self.total > 0 { self.correct as f64 / self.total as f64 } else { 0.0 }
    }
}

/// Count rows of `probs` whose argmax equals the label.
///
/// argmax(1) returns shape [batch, 1] — flatten to [batch]
/// before comparing with labels.
pub fn count_correct<B: Backend>(probs: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> usize {
    let predicted = probs.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted
        .equal(labels)
        .int().sum().into_scalar().elem::<i64>();
    correct as usize
}

pub fn evaluate<B: Backend>(
    classifier: &Classifier<B>,
    loader:     &dyn DataLoader<DigitBatch<B>>,
) -> Accuracy {
    let mut acc = Accuracy::default();

    for batch in loader.iter() {
        acc.total   += batch.labels.dims()[0];
        let probs    = classifier.forward(batch.images);
        acc.correct += count_correct(probs, batch.labels);
    }

    tracing::debug!("Evaluated {} samples, {} correct", acc.total, acc.correct);
    acc
}
