// ============================================================
// Layer 3 — DigitSample Domain Type
// ============================================================
// One handwritten digit: a 28x28 grayscale image flattened
// row-major into 784 floats, plus its class label (0-9).
//
// Pixels are already scaled from raw intensities (0..=255)
// into [0.0, 1.0] by the time a DigitSample exists.
//
// Reference: Rust Book §5 (Structs and Methods)

/// Image side length in pixels
pub const IMAGE_SIDE: usize = 28;

/// Number of pixels in one flattened image (28 * 28)
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Number of digit classes
pub const NUM_CLASSES: usize = 10;

/// A single labelled digit image.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitSample {
    /// 784 intensities in [0, 1], row-major
    pub pixels: Vec<f32>,

    /// The true digit, 0..=9
    pub label: u8,
}

impl DigitSample {
    pub fn new(pixels: Vec<f32>, label: u8) -> Self {
        Self { pixels, label }
    }

    /// The label as a one-hot vector of length NUM_CLASSES.
    ///
    /// Example: label 3 → [0, 0, 0, 1, 0, 0, 0, 0, 0, 0]
    pub fn one_hot(&self) -> [f32; NUM_CLASSES] {
        let mut v = [0.0f32; NUM_CLASSES];
        v[self.label as usize] = 1.0;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_has_single_hot_entry() {
        let s = DigitSample::new(vec![0.0; IMAGE_PIXELS], 3);
        let v = s.one_hot();
        assert_eq!(v[3], 1.0);
        assert_eq!(v.iter().sum::<f32>(), 1.0);
    }
}
