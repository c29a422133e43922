//! Model interface consumed by the training and evaluation loops

use crate::autograd::Tensor;
use crate::device::Device;
use crate::error::Result;

/// Execution mode of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Gradient tracking on; forward passes build a graph.
    Train,
    /// Inference: no gradient tracking, no parameter updates.
    Eval,
}

/// An externally supplied differentiable model.
///
/// The harness treats the model as opaque: it calls `forward`, hands the
/// logits to the loss, and steps an optimizer over the shared parameter
/// handles. Architecture is entirely the implementor's concern.
pub trait Model {
    /// Map an input batch to per-position class scores (logits), flattened
    /// to `positions * num_classes` values.
    ///
    /// In [`Mode::Eval`] the forward pass must not build a gradient graph;
    /// routing through [`Tensor::detach`]ed parameters is the usual way.
    fn forward(&self, inputs: &Tensor) -> Tensor;

    /// Width of the class dimension of the logits.
    fn num_classes(&self) -> usize;

    /// Shared handles to the learnable parameters.
    ///
    /// Handles alias the model's own buffers, so optimizer updates are
    /// visible on the next forward pass.
    fn parameters(&self) -> Vec<Tensor>;

    /// Switch between training and inference behavior.
    fn set_mode(&mut self, _mode: Mode) {}

    /// Relocate the model to `device`.
    ///
    /// The default validates availability; models owning device-resident
    /// state override this to actually move it.
    fn to_device(&mut self, device: Device) -> Result<()> {
        device.ensure_available()
    }
}
