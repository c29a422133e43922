//! Gradient-carrying tensor handle
//!
//! A `Tensor` is a cheap-to-clone shared handle: clones alias the same data
//! and gradient buffers, so an optimizer holding parameter handles mutates
//! the values the model reads on its next forward pass. Buffers are flat
//! `Array1<f32>`; shape is carried by the call sites that need it (matrix
//! ops take explicit dimensions, the loss takes a class count).

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use ndarray::Array1;
use rand::Rng;

use crate::autograd::BackwardOp;
use crate::device::Device;
use crate::error::Result;

/// A 1-D tensor of `f32` with optional gradient state.
#[derive(Clone)]
pub struct Tensor {
    data: Rc<RefCell<Array1<f32>>>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    backward_op: Rc<RefCell<Option<Rc<dyn BackwardOp>>>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from an ndarray buffer.
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
            grad: Rc::new(RefCell::new(None)),
            backward_op: Rc::new(RefCell::new(None)),
            requires_grad,
        }
    }

    /// Create a tensor from a plain vector.
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a zero-filled tensor of the given length.
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Create a tensor of standard-normal samples (Box-Muller).
    pub fn randn(len: usize, requires_grad: bool) -> Self {
        let mut rng = rand::rng();
        let data: Vec<f32> = (0..len)
            .map(|_| {
                let u1: f32 = rng.random::<f32>().max(1e-7);
                let u2: f32 = rng.random();
                (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
            })
            .collect();
        Self::from_vec(data, requires_grad)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the underlying buffer.
    pub fn data(&self) -> Array1<f32> {
        self.data.borrow().clone()
    }

    /// Mutable access to the underlying buffer.
    ///
    /// Clones of this tensor observe the mutation; that aliasing is what lets
    /// an optimizer update parameters a model still holds.
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.data.borrow_mut()
    }

    /// Whether gradients are tracked for this tensor.
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Copy of the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Replace the gradient buffer.
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add into the gradient buffer, initializing it on first use.
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing = &*existing + &grad,
            None => *cell = Some(grad),
        }
    }

    /// Drop the gradient buffer so the next backward pass starts fresh.
    ///
    /// Skipping this between optimizer steps double-counts gradients.
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Shared handle to the gradient cell, for backward ops.
    pub fn grad_cell(&self) -> Rc<RefCell<Option<Array1<f32>>>> {
        Rc::clone(&self.grad)
    }

    /// The backward op producing this tensor, if it is part of a graph.
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.backward_op.borrow().clone()
    }

    /// Attach the backward op that produced this tensor.
    pub fn set_backward_op(&mut self, op: Rc<dyn BackwardOp>) {
        *self.backward_op.borrow_mut() = Some(op);
    }

    /// A view of the same data with gradient tracking disabled.
    ///
    /// The returned handle aliases the data buffer but carries no gradient
    /// cell and no backward op; forwarding through detached parameters builds
    /// no graph, which is what evaluation mode relies on.
    pub fn detach(&self) -> Tensor {
        Tensor {
            data: Rc::clone(&self.data),
            grad: Rc::new(RefCell::new(None)),
            backward_op: Rc::new(RefCell::new(None)),
            requires_grad: false,
        }
    }

    /// Validate a transfer to `device`.
    ///
    /// Host memory is the only residency in this build, so a successful
    /// transfer returns the same shared handle.
    pub fn to_device(&self, device: Device) -> Result<Tensor> {
        device.ensure_available()?;
        Ok(self.clone())
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data.borrow())
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.borrow().is_some())
            .finish()
    }
}
