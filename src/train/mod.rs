//! The training loop and its collaborators
//!
//! [`train`] drives the supervised loop: draw a batch, forward, masked
//! cross-entropy, backward, optimizer step, gradient reset, record the
//! loss, and periodically emit a progress line.

mod config;
mod loss;
mod metrics;
mod progress;
mod trainer;

pub use config::TrainConfig;
pub use loss::{LossFn, MaskedCrossEntropyLoss};
pub use metrics::MetricsTracker;
pub use progress::log_progress;
pub use trainer::train;
