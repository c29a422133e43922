//! Differentiable tensor operations
//!
//! Each op computes its result eagerly and, when an input tracks gradients,
//! installs a backward node that routes the result's gradient to the inputs.
//! Matrices are row-major flat buffers with explicit dimensions.

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use crate::autograd::{BackwardOp, Tensor};

/// Add two tensors element-wise.
pub fn add(a: &Tensor, b: &Tensor) -> Tensor {
    assert_eq!(a.len(), b.len(), "add operands must have equal length");
    let data = a.data() + &b.data();
    let requires_grad = a.requires_grad() || b.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct AddBackward {
    a: Tensor,
    b: Tensor,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for AddBackward {
    fn backward(&self) {
        let grad = match self.result_grad.borrow().as_ref() {
            Some(grad) => grad.clone(),
            None => return,
        };

        if self.a.requires_grad() {
            self.a.accumulate_grad(grad.clone());
        }
        if self.b.requires_grad() {
            self.b.accumulate_grad(grad);
        }

        if let Some(op) = self.a.backward_op() {
            op.backward();
        }
        if let Some(op) = self.b.backward_op() {
            op.backward();
        }
    }
}

/// Scale a tensor by a scalar.
pub fn scale(a: &Tensor, factor: f32) -> Tensor {
    let data = a.data() * factor;
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(ScaleBackward {
            a: a.clone(),
            factor,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct ScaleBackward {
    a: Tensor,
    factor: f32,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for ScaleBackward {
    fn backward(&self) {
        let grad = match self.result_grad.borrow().as_ref() {
            Some(grad) => grad * self.factor,
            None => return,
        };

        self.a.accumulate_grad(grad);

        if let Some(op) = self.a.backward_op() {
            op.backward();
        }
    }
}

/// Transpose a row-major matrix (rows x cols) to (cols x rows).
pub fn transpose(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut transposed = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            transposed[c * rows + r] = data[r * cols + c];
        }
    }
    transposed
}

fn matmul_compute(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let mut c = vec![0.0f32; m * n];
    for i in 0..m {
        for p in 0..k {
            let lhs = a[i * k + p];
            for j in 0..n {
                c[i * n + j] += lhs * b[p * n + j];
            }
        }
    }
    c
}

/// Matrix multiplication C = A @ B.
///
/// A is m×k, B is k×n, C is m×n, all flattened row-major.
///
/// # Panics
///
/// Panics when the buffer lengths disagree with the given dimensions.
pub fn matmul(a: &Tensor, b: &Tensor, m: usize, k: usize, n: usize) -> Tensor {
    assert_eq!(a.len(), m * k, "matrix A size mismatch");
    assert_eq!(b.len(), k * n, "matrix B size mismatch");

    let a_data = a.data();
    let b_data = b.data();
    let result_data = matmul_compute(
        a_data.as_slice().expect("matrix A must be contiguous"),
        b_data.as_slice().expect("matrix B must be contiguous"),
        m,
        k,
        n,
    );

    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(Array1::from(result_data), requires_grad);

    if requires_grad {
        let backward_op = Rc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
            m,
            k,
            n,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    m: usize,
    k: usize,
    n: usize,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self) {
        let grad_c = match self.result_grad.borrow().as_ref() {
            Some(grad) => grad.to_vec(),
            None => return,
        };

        let a_data = self.a.data();
        let b_data = self.b.data();
        let a_slice = a_data.as_slice().expect("matrix A must be contiguous");
        let b_slice = b_data.as_slice().expect("matrix B must be contiguous");

        if self.a.requires_grad() {
            // grad_A = grad_C @ B^T: (m, n) @ (n, k) = (m, k)
            let b_t = transpose(b_slice, self.k, self.n);
            let grad_a = matmul_compute(&grad_c, &b_t, self.m, self.n, self.k);
            self.a.accumulate_grad(Array1::from(grad_a));
        }

        if self.b.requires_grad() {
            // grad_B = A^T @ grad_C: (k, m) @ (m, n) = (k, n)
            let a_t = transpose(a_slice, self.m, self.k);
            let grad_b = matmul_compute(&a_t, &grad_c, self.k, self.m, self.n);
            self.b.accumulate_grad(Array1::from(grad_b));
        }

        if let Some(op) = self.a.backward_op() {
            op.backward();
        }
        if let Some(op) = self.b.backward_op() {
            op.backward();
        }
    }
}
