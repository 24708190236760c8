use burn::data::dataset::Dataset;

use crate::domain::sample::DigitSample;

pub struct DigitDataset {
    samples: Vec<DigitSample>,
}

impl DigitDataset {
    pub fn new(samples: Vec<DigitSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    /// Number of batches one pass over the dataset yields, counting
    /// a final partial batch.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.samples.len().div_ceil(batch_size.max(1))
    }
}

impl Dataset<DigitSample> for DigitDataset {
    fn get(&self, index: usize) -> Option<DigitSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
