//! Stochastic gradient descent optimizer

use ndarray::Array1;

use super::Optimizer;
use crate::autograd::Tensor;

/// SGD optimizer with optional momentum.
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<Array1<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer. `momentum` of 0.0 gives plain SGD.
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, velocities: Vec::new() }
    }

    fn ensure_velocities(&mut self, params: &[Tensor]) {
        if self.velocities.is_empty() {
            self.velocities = params.iter().map(|_| None).collect();
        }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_velocities(params);

        for (i, param) in params.iter_mut().enumerate() {
            if let Some(grad) = param.grad() {
                if self.momentum > 0.0 {
                    // v = momentum * v - lr * grad
                    let velocity = if let Some(v) = &self.velocities[i] {
                        v * self.momentum - &grad * self.lr
                    } else {
                        &grad * (-self.lr)
                    };

                    let new_data = param.data() + &velocity;
                    *param.data_mut() = new_data;
                    self.velocities[i] = Some(velocity);
                } else {
                    let new_data = param.data() - &(&grad * self.lr);
                    *param.data_mut() = new_data;
                }
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_plain_sgd_update() {
        let mut opt = SGD::new(0.1, 0.0);
        let param = Tensor::from_vec(vec![1.0, 2.0], true);
        param.set_grad(arr1(&[1.0, -1.0]));

        opt.step(&mut [param.clone()]);

        let data = param.data();
        assert_abs_diff_eq!(data[0], 0.9, epsilon = 1e-6);
        assert_abs_diff_eq!(data[1], 2.1, epsilon = 1e-6);
    }

    #[test]
    fn test_momentum_accumulates_velocity() {
        let mut opt = SGD::new(0.1, 0.9);
        let param = Tensor::from_vec(vec![0.0], true);

        param.set_grad(arr1(&[1.0]));
        opt.step(&mut [param.clone()]);
        param.zero_grad();
        // first step: -lr * g = -0.1
        assert_abs_diff_eq!(param.data()[0], -0.1, epsilon = 1e-6);

        param.set_grad(arr1(&[1.0]));
        opt.step(&mut [param.clone()]);
        // second step adds momentum * v - lr * g = -0.19
        assert_abs_diff_eq!(param.data()[0], -0.29, epsilon = 1e-6);
    }

    #[test]
    fn test_no_double_count_after_zero_grad() {
        // Two identical steps separated by zero_grad move the parameter by
        // exactly the same amount each time; stale gradients would not.
        let mut opt = SGD::new(0.1, 0.0);
        let param = Tensor::from_vec(vec![1.0], true);

        param.set_grad(arr1(&[1.0]));
        opt.step(&mut [param.clone()]);
        opt.zero_grad(&mut [param.clone()]);
        let after_first = param.data()[0];

        param.set_grad(arr1(&[1.0]));
        opt.step(&mut [param.clone()]);
        opt.zero_grad(&mut [param.clone()]);
        let after_second = param.data()[0];

        assert!(((1.0 - after_first) - (after_first - after_second)).abs() < 1e-6);
        assert!(param.grad().is_none());
    }
}
