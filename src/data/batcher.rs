// ============================================================
// Layer 4 — Digit Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<DigitSample>
// into the three tensors the training loop needs.
//
// How batching works here:
//   Input:  Vec of N DigitSamples, each with 784 pixels
//   Output: DigitBatch with
//             images  [N, 784]  float
//             labels  [N]       int
//             one_hot [N, 10]   float
//
//   The one-hot matrix is what the discriminator sees as the
//   "real" class vector, so it is built once here rather than
//   on every forward pass.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::{DigitSample, IMAGE_PIXELS, NUM_CLASSES};

// ─── DigitBatch ───────────────────────────────────────────────────────────────
/// A batch of digit images ready for the forward pass.
/// All tensors have batch_size as their first dimension.
#[derive(Debug, Clone)]
pub struct DigitBatch<B: Backend> {
    /// Flattened images — shape: [batch_size, 784]
    pub images: Tensor<B, 2>,

    /// True digits — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,

    /// One-hot encoding of labels — shape: [batch_size, 10]
    pub one_hot: Tensor<B, 2>,
}

// ─── DigitBatcher ─────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the
/// correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct DigitBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> DigitBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<DigitSample, DigitBatch<B>> for DigitBatcher<B> {
    fn batch(&self, items: Vec<DigitSample>) -> DigitBatch<B> {
        let batch_size = items.len();

        let pixels: Vec<f32> = items
            .iter()
            .flat_map(|s| s.pixels.iter().copied())
            .collect();

        let labels: Vec<i64> = items
            .iter()
            .map(|s| s.label as i64)
            .collect();

        let one_hot: Vec<f32> = items
            .iter()
            .flat_map(|s| s.one_hot())
            .collect();

        let images = Tensor::<B, 2>::from_data(
            TensorData::new(pixels, [batch_size, IMAGE_PIXELS]), &self.device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]), &self.device,
        );
        let one_hot = Tensor::<B, 2>::from_data(
            TensorData::new(one_hot, [batch_size, NUM_CLASSES]), &self.device,
        );

        DigitBatch { images, labels, one_hot }
    }
}
