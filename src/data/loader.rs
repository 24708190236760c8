// ============================================================
// Layer 4 — MNIST Loader
// ============================================================
// Wraps burn's vision::MnistDataset, which fetches the four
// MNIST files into burn's dataset cache on first use and
// decodes them into MnistItem { image: [[f32; 28]; 28], label }.
//
// This loader only converts those items into DigitSamples:
//   - rows are flattened into 784 pixels, row-major
//   - raw intensities 0..=255 are scaled into [0, 1]
//
// Reference: Burn Book §4 (Datasets), burn-dataset vision module

use anyhow::{ensure, Result};
use burn::data::dataset::{
    vision::{MnistDataset, MnistItem},
    Dataset,
};

use crate::domain::mode::Split;
use crate::domain::sample::{DigitSample, IMAGE_PIXELS, NUM_CLASSES};
use crate::domain::traits::DigitSource;

/// Loads MNIST splits through burn's dataset loader.
/// Implements the DigitSource trait from Layer 3.
#[derive(Debug, Default)]
pub struct MnistLoader;

impl MnistLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DigitSource for MnistLoader {
    fn load_split(&self, split: Split) -> Result<Vec<DigitSample>> {
        let dataset = match split {
            Split::Train => MnistDataset::train(),
            Split::Test  => MnistDataset::test(),
        };

        let samples = dataset
            .iter()
            .map(|item| sample_from_item(&item))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Loaded {} {:?} samples", samples.len(), split);
        Ok(samples)
    }
}

/// Flatten and rescale one MnistItem.
fn sample_from_item(item: &MnistItem) -> Result<DigitSample> {
    ensure!(
        (item.label as usize) < NUM_CLASSES,
        "MNIST label {} is not a digit",
        item.label,
    );

    let pixels: Vec<f32> = item
        .image
        .iter()
        .flat_map(|row| row.iter().map(|p| p / 255.0))
        .collect();
    debug_assert_eq!(pixels.len(), IMAGE_PIXELS);

    Ok(DigitSample::new(pixels, item.label))
}
