//! Masked cross-entropy loss

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use crate::autograd::{BackwardOp, Tensor};

/// Trait for loss functions.
pub trait LossFn {
    /// Compute a scalar loss from predictions and targets, installing
    /// gradients for backpropagation when the predictions track them.
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor;

    /// Name of the loss function.
    fn name(&self) -> &'static str;
}

/// Cross-entropy over class logits with an ignore mask.
///
/// Logits are flattened `(positions, num_classes)`; targets hold one class
/// index per position, as `f32`. A negative target marks a masked position
/// excluded from both the loss and the gradient. The loss is the mean
/// negative log-likelihood over non-masked positions.
///
/// When every position is masked the mean is `0/0` and the loss is `NaN`
/// with an all-zero gradient; callers that can produce fully masked batches
/// must treat the value as undefined.
pub struct MaskedCrossEntropyLoss {
    num_classes: usize,
}

impl MaskedCrossEntropyLoss {
    /// Create the loss for a given class count.
    ///
    /// # Panics
    ///
    /// Panics when `num_classes` is zero.
    pub fn new(num_classes: usize) -> Self {
        assert!(num_classes > 0, "num_classes must be positive");
        Self { num_classes }
    }

    fn softmax(logits: &[f32]) -> Vec<f32> {
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp_vals: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
        let sum: f32 = exp_vals.iter().sum();
        exp_vals.iter().map(|&x| x / sum).collect()
    }
}

impl LossFn for MaskedCrossEntropyLoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        let positions = targets.len();
        let num_classes = self.num_classes;

        assert_eq!(
            predictions.len(),
            positions * num_classes,
            "predictions must hold positions * num_classes logits"
        );

        let pred_data = predictions.data();
        let pred_slice = pred_data.as_slice().expect("prediction data must be contiguous");
        let target_data = targets.data();

        let mut total_loss = 0.0;
        let mut num_valid = 0usize;
        let mut grads = vec![0.0f32; predictions.len()];

        for pos in 0..positions {
            let target = target_data[pos];
            if target < 0.0 {
                continue; // masked position
            }
            let class = target as usize;
            assert!(
                class < num_classes,
                "target class {class} out of range for {num_classes} classes"
            );

            let start = pos * num_classes;
            let probs = Self::softmax(&pred_slice[start..start + num_classes]);

            let prob = probs[class].max(1e-10);
            total_loss -= prob.ln();
            num_valid += 1;

            // Gradient of the per-position NLL: softmax - one_hot(target)
            for (i, &p) in probs.iter().enumerate() {
                grads[start + i] = if i == class { p - 1.0 } else { p };
            }
        }

        // 0/0 when fully masked: the mean over zero positions is NaN.
        let mean_loss = total_loss / num_valid as f32;

        if num_valid > 0 {
            let scale = 1.0 / num_valid as f32;
            for g in &mut grads {
                *g *= scale;
            }
        }

        let mut loss = Tensor::from_vec(vec![mean_loss], predictions.requires_grad());

        if predictions.requires_grad() {
            loss.set_backward_op(Rc::new(MaskedCrossEntropyBackward {
                pred_grad_cell: predictions.grad_cell(),
                pred_backward_op: predictions.backward_op(),
                grad: Array1::from(grads),
            }));
        }

        loss
    }

    fn name(&self) -> &'static str {
        "MaskedCrossEntropy"
    }
}

struct MaskedCrossEntropyBackward {
    pred_grad_cell: Rc<RefCell<Option<Array1<f32>>>>,
    pred_backward_op: Option<Rc<dyn BackwardOp>>,
    grad: Array1<f32>,
}

impl BackwardOp for MaskedCrossEntropyBackward {
    fn backward(&self) {
        {
            let mut pred_grad = self.pred_grad_cell.borrow_mut();
            match pred_grad.as_mut() {
                Some(existing) => *existing = &*existing + &self.grad,
                None => *pred_grad = Some(self.grad.clone()),
            }
        }

        if let Some(ref op) = self.pred_backward_op {
            op.backward();
        }
    }
}
