//! Error types with actionable diagnostics.
//!
//! Every recoverable failure in the harness surfaces as a [`PracticarError`];
//! contract violations (shape mismatches, out-of-range classes) panic at the
//! site of the violated assertion instead.

use thiserror::Error;

use crate::device::Device;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, PracticarError>;

/// Errors that can occur while training or evaluating.
#[derive(Error, Debug)]
pub enum PracticarError {
    /// A tensor or model transfer targeted a device this build cannot reach.
    #[error("device not available: {device}\n  → Select Device::Cpu or build with an accelerator backend")]
    DeviceUnavailable { device: Device },

    /// The training batch source failed to produce a batch.
    #[error("batch source failure: {message}\n  → Check the data source; the run aborts at the first failed draw")]
    DataSource { message: String },

    /// The validation iterator yielded zero batches, so no average exists.
    #[error("validation set yielded no batches\n  → evaluate needs at least one batch to form an average")]
    EmptyValidation,
}
