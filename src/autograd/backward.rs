//! Backward operation trait

/// A node in the computational graph that propagates gradients to its inputs.
///
/// Implementations accumulate the gradient of the loss with respect to each
/// input tensor, then recursively invoke the inputs' own backward ops.
pub trait BackwardOp {
    /// Propagate gradients backwards through this operation.
    fn backward(&self);
}
