//! Training configuration

use serde::{Deserialize, Serialize};

use crate::device::Device;

/// Configuration for the training loop.
///
/// Defaults: batch size 32, learning rate 1e-3, 1000 steps, best available
/// device, progress line every 10 steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Batch size requested from the batch source. Must be positive.
    pub batch_size: usize,
    /// Learning rate for the optimizer. Must be positive.
    pub lr: f32,
    /// Number of training steps to run.
    pub max_steps: usize,
    /// Device inputs, targets, and the model are placed on.
    pub device: Device,
    /// Emit a progress line every this many steps. A value of zero makes
    /// the progress check compute a remainder by zero and panic.
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            lr: 1e-3,
            max_steps: 1000,
            device: Device::detect(),
            log_every: 10,
        }
    }
}

impl TrainConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the learning rate.
    pub fn with_lr(mut self, lr: f32) -> Self {
        self.lr = lr;
        self
    }

    /// Set the number of training steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the compute device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the progress-line interval.
    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
