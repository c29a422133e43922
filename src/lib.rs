//! practicar — a minimal supervised-training harness
//!
//! Two loops over an externally supplied differentiable [`Model`] and an
//! externally supplied [`BatchSource`]:
//!
//! - [`train`] repeatedly draws a batch, runs a forward pass, computes
//!   masked cross-entropy, backpropagates, steps Adam, and records the
//!   per-step loss in a [`MetricsTracker`], printing a progress line every
//!   `log_every` steps.
//! - [`evaluate`] iterates a finite validation sequence once in inference
//!   mode and returns the average per-batch loss.
//!
//! Target positions labeled `-1` are excluded from the loss (padding mask).
//! Everything is single-threaded and synchronous; the first failure aborts
//! the run.
//!
//! # Example
//!
//! ```
//! use practicar::autograd::ops::matmul;
//! use practicar::{
//!     evaluate, train, Batch, CyclicBatchSource, Device, Mode, Model, Tensor, TrainConfig,
//! };
//!
//! # fn main() -> practicar::Result<()> {
//! struct Linear {
//!     weight: Tensor,
//!     in_dim: usize,
//!     classes: usize,
//!     mode: Mode,
//! }
//!
//! impl Model for Linear {
//!     fn forward(&self, inputs: &Tensor) -> Tensor {
//!         let weight = match self.mode {
//!             Mode::Train => self.weight.clone(),
//!             Mode::Eval => self.weight.detach(),
//!         };
//!         let positions = inputs.len() / self.in_dim;
//!         matmul(inputs, &weight, positions, self.in_dim, self.classes)
//!     }
//!
//!     fn num_classes(&self) -> usize {
//!         self.classes
//!     }
//!
//!     fn parameters(&self) -> Vec<Tensor> {
//!         vec![self.weight.clone()]
//!     }
//!
//!     fn set_mode(&mut self, mode: Mode) {
//!         self.mode = mode;
//!     }
//! }
//!
//! let model = Linear {
//!     weight: Tensor::zeros(6, true),
//!     in_dim: 2,
//!     classes: 3,
//!     mode: Mode::Train,
//! };
//!
//! // Two positions per batch; the second is masked out of the loss.
//! let batch = Batch::new(
//!     Tensor::from_vec(vec![1.0, 0.0, 0.0, 1.0], false),
//!     Tensor::from_vec(vec![2.0, -1.0], false),
//! );
//! let mut source = CyclicBatchSource::new(vec![batch.clone()]);
//! let config = TrainConfig::new()
//!     .with_batch_size(2)
//!     .with_max_steps(3)
//!     .with_device(Device::Cpu);
//!
//! let (mut model, metrics) = train(model, &mut source, &config)?;
//! assert_eq!(metrics.series("loss").unwrap().len(), 3);
//!
//! let avg = evaluate(&mut model, vec![batch], Device::Cpu)?;
//! assert!(avg.is_finite());
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod data;
pub mod device;
pub mod error;
pub mod eval;
pub mod model;
pub mod optim;
pub mod train;

pub use autograd::Tensor;
pub use data::{Batch, BatchSource, CyclicBatchSource};
pub use device::Device;
pub use error::{PracticarError, Result};
pub use eval::evaluate;
pub use model::{Mode, Model};
pub use train::{train, LossFn, MaskedCrossEntropyLoss, MetricsTracker, TrainConfig};
