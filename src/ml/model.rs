use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

/// A differentiable classifier: features in, class scores out.
///
/// Anything driven by the epoch trainer implements this. D is the
/// rank of the feature tensor; the output is always
/// `[batch_size, num_classes]`.
pub trait Network<B: Backend, const D: usize>: Module<B> {
    fn forward(&self, features: Tensor<B, D>) -> Tensor<B, 2>;
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    pub num_features: usize,
    pub num_classes:  usize,
    #[config(default = 64)]
    pub hidden:       usize,
    #[config(default = 0.1)]
    pub dropout:      f64,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        Classifier {
            input:   LinearConfig::new(self.num_features, self.hidden).init(device),
            output:  LinearConfig::new(self.hidden, self.num_classes).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }

    /// Parameter count of the network this config builds.
    pub fn num_params(&self) -> usize {
        (self.num_features + 1) * self.hidden + (self.hidden + 1) * self.num_classes
    }
}

/// Two-layer perceptron for tabular rows:
/// Linear → ReLU → Dropout → Linear.
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub input:   Linear<B>,
    pub output:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> Network<B, 2> for Classifier<B> {
    /// features: [batch, num_features] → logits: [batch, num_classes]
    fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.input.forward(features));
        let x = self.dropout.forward(x);
        self.output.forward(x)
    }
}
