use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::{relu, sigmoid, softmax},
};

use crate::domain::sample::NUM_CLASSES;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    #[config(default = 784)]
    pub input_size:  usize,
    #[config(default = 400)]
    pub hidden_size: usize,
    #[config(default = 10)]
    pub num_classes: usize,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        Classifier {
            fc1: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            fc2: LinearConfig::new(self.hidden_size, self.num_classes).init(device),
        }
    }
}

/// The generator/classifier: image → class-probability vector.
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub fc1: Linear<B>,
    pub fc2: Linear<B>,
}

impl<B: Backend> Classifier<B> {
    /// images: [batch, 784] → probabilities: [batch, 10], each row sums to 1
    pub fn forward(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        let h = relu(self.fc1.forward(images));
        softmax(self.fc2.forward(h), 1)
    }
}

#[derive(Config, Debug)]
pub struct DiscriminatorConfig {
    /// Two concatenated class vectors
    #[config(default = 20)]
    pub input_size:  usize,
    #[config(default = 10)]
    pub hidden_size: usize,
}

impl DiscriminatorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        Discriminator {
            fc1: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            fc2: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

/// Judges whether a (class vector, class vector) pair is real.
#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    pub fc1: Linear<B>,
    pub fc2: Linear<B>,
}

impl<B: Backend> Discriminator<B> {
    /// pair: [batch, 20] → pre-sigmoid score: [batch, 1]
    pub fn forward_logits(&self, pair: Tensor<B, 2>) -> Tensor<B, 2> {
        self.fc2.forward(relu(self.fc1.forward(pair)))
    }

    /// pair: [batch, 20] → probability the pair is real: [batch, 1]
    pub fn forward(&self, pair: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.forward_logits(pair))
    }
}

/// Concatenate a candidate class vector with the reference one-hot
/// vector along the feature axis: [batch, 10] ++ [batch, 10] → [batch, 20].
pub fn class_pair<B: Backend>(candidate: Tensor<B, 2>, reference: Tensor<B, 2>) -> Tensor<B, 2> {
    debug_assert_eq!(candidate.dims()[1], NUM_CLASSES);
    Tensor::cat(vec![candidate, reference], 1)
}
