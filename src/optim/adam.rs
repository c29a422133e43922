//! Adam optimizer

use ndarray::Array1;

use super::Optimizer;
use crate::autograd::Tensor;

/// Adam optimizer with bias-corrected first and second moments.
///
/// Update rule:
/// m_t = β1 * m_{t-1} + (1 - β1) * g
/// v_t = β2 * v_{t-1} + (1 - β2) * g²
/// θ_t = θ_{t-1} - lr_t * m_t / (√v_t + ε)
///
/// where lr_t folds both bias corrections into the learning rate.
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<Array1<f32>>>,
    v: Vec<Option<Array1<f32>>>,
}

impl Adam {
    /// Create a new Adam optimizer.
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Create Adam with the standard defaults (β1 0.9, β2 0.999, ε 1e-8).
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8)
    }

    fn ensure_moments(&mut self, params: &[Tensor]) {
        if self.m.is_empty() {
            self.m = params.iter().map(|_| None).collect();
            self.v = params.iter().map(|_| None).collect();
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_moments(params);
        self.t += 1;

        let lr_t = self.lr
            * ((1.0 - self.beta2.powi(self.t as i32)).sqrt()
                / (1.0 - self.beta1.powi(self.t as i32)));

        for (i, param) in params.iter_mut().enumerate() {
            if let Some(grad) = param.grad() {
                let m_t = if let Some(m) = &self.m[i] {
                    m * self.beta1 + &grad * (1.0 - self.beta1)
                } else {
                    &grad * (1.0 - self.beta1)
                };

                let grad_sq = &grad * &grad;
                let v_t = if let Some(v) = &self.v[i] {
                    v * self.beta2 + &grad_sq * (1.0 - self.beta2)
                } else {
                    &grad_sq * (1.0 - self.beta2)
                };

                let update = &m_t / &(v_t.mapv(f32::sqrt) + self.epsilon) * lr_t;
                let new_data = param.data() - &update;
                *param.data_mut() = new_data;

                self.m[i] = Some(m_t);
                self.v[i] = Some(v_t);
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
    fn test_first_step_magnitude() {
        // With a constant gradient, the bias-corrected first step moves each
        // parameter by approximately lr.
        let mut opt = Adam::new(0.1, 0.9, 0.999, 1e-8);
        let param = Tensor::from_vec(vec![1.0, 1.0], true);
        param.set_grad(arr1(&[0.5, -0.5]));

        opt.step(&mut [param.clone()]);

        let data = param.data();
        assert_abs_diff_eq!(data[0], 0.9, epsilon = 1e-3);
        assert_abs_diff_eq!(data[1], 1.1, epsilon = 1e-3);
    }

    #[test]
    fn test_descends_on_quadratic() {
        // Minimize f(x) = x² with exact gradient 2x.
        let mut opt = Adam::default_params(0.1);
        let param = Tensor::from_vec(vec![2.0], true);

        let initial = param.data()[0].powi(2);
        for _ in 0..50 {
            let x = param.data()[0];
            param.set_grad(arr1(&[2.0 * x]));
            opt.step(&mut [param.clone()]);
            param.zero_grad();
        }
        let last = param.data()[0].powi(2);
        assert!(last < initial, "loss should shrink: {initial} -> {last}");
        assert!(last < 1.0);
    }

    #[test]
    fn test_skips_params_without_grad() {
        let mut opt = Adam::default_params(0.1);
        let param = Tensor::from_vec(vec![3.0], true);

        opt.step(&mut [param.clone()]);

        assert_eq!(param.data()[0], 3.0);
    }

    #[test]
    fn test_set_lr() {
        let mut opt = Adam::default_params(0.001);
        assert_eq!(opt.lr(), 0.001);
        opt.set_lr(0.01);
        assert_eq!(opt.lr(), 0.01);
    }
}
