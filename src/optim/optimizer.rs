//! Optimizer trait

use crate::autograd::Tensor;

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Apply one update step to parameters that carry gradients.
    fn step(&mut self, params: &mut [Tensor]);

    /// Drop all accumulated gradients.
    ///
    /// Must run after every step so the next backward pass starts from
    /// empty gradient state; stale gradients double-count across steps.
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }

    /// Current learning rate.
    fn lr(&self) -> f32;

    /// Replace the learning rate.
    fn set_lr(&mut self, lr: f32);
}
