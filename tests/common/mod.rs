//! Shared fixtures: a linear classifier over flat inputs.

use practicar::autograd::ops::matmul;
use practicar::{Batch, Mode, Model, Tensor};

/// Linear model mapping `in_dim` features per position to class logits.
#[derive(Debug)]
pub struct LinearModel {
    weight: Tensor,
    in_dim: usize,
    classes: usize,
    mode: Mode,
}

impl LinearModel {
    /// Zero-initialized weights: uniform logits before training.
    pub fn zeroed(in_dim: usize, classes: usize) -> Self {
        Self {
            weight: Tensor::zeros(in_dim * classes, true),
            in_dim,
            classes,
            mode: Mode::Train,
        }
    }

    /// Small random weights.
    pub fn randomized(in_dim: usize, classes: usize) -> Self {
        let init = Tensor::randn(in_dim * classes, false).data() * 0.1;
        Self {
            weight: Tensor::new(init, true),
            in_dim,
            classes,
            mode: Mode::Train,
        }
    }

    /// Shared handle to the weight matrix.
    pub fn weight(&self) -> Tensor {
        self.weight.clone()
    }
}

impl Model for LinearModel {
    fn forward(&self, inputs: &Tensor) -> Tensor {
        let weight = match self.mode {
            Mode::Train => self.weight.clone(),
            Mode::Eval => self.weight.detach(),
        };
        let positions = inputs.len() / self.in_dim;
        matmul(inputs, &weight, positions, self.in_dim, self.classes)
    }

    fn num_classes(&self) -> usize {
        self.classes
    }

    fn parameters(&self) -> Vec<Tensor> {
        vec![self.weight.clone()]
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

/// One-hot batch: position `i` has input `e_{class[i]}` and target `class[i]`.
pub fn one_hot_batch(classes: &[i64], num_classes: usize) -> Batch {
    let mut inputs = vec![0.0f32; classes.len() * num_classes];
    let mut targets = Vec::with_capacity(classes.len());
    for (pos, &class) in classes.iter().enumerate() {
        if class >= 0 {
            inputs[pos * num_classes + class as usize] = 1.0;
        }
        targets.push(class as f32);
    }
    Batch::new(Tensor::from_vec(inputs, false), Tensor::from_vec(targets, false))
}
