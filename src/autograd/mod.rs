//! Tape-based autograd engine
//!
//! Automatic differentiation over a computational graph of shared tensor
//! handles. Forward ops install [`BackwardOp`] nodes; calling [`backward`]
//! on a scalar loss walks the graph and accumulates gradients into each
//! parameter's gradient cell.

mod backward;
pub mod ops;
mod tensor;

pub use backward::BackwardOp;
pub use tensor::Tensor;

/// Perform a backward pass from `tensor`.
///
/// Seeds the tensor's gradient with `grad_output`, or with ones when `None`
/// (the usual case for a scalar loss), then propagates through the graph.
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        let ones = ndarray::Array1::ones(tensor.len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_seeds_ones() {
        let a = Tensor::from_vec(vec![1.0, 2.0], true);
        let b = Tensor::from_vec(vec![3.0, 4.0], true);
        let mut c = ops::add(&a, &b);

        backward(&mut c, None);

        assert_eq!(a.grad().unwrap().to_vec(), vec![1.0, 1.0]);
        assert_eq!(b.grad().unwrap().to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_backward_with_explicit_seed() {
        let a = Tensor::from_vec(vec![1.0, 2.0], true);
        let mut c = ops::scale(&a, 2.0);

        backward(&mut c, Some(ndarray::arr1(&[10.0, 10.0])));

        assert_eq!(a.grad().unwrap().to_vec(), vec![20.0, 20.0]);
    }

    #[test]
    fn test_backward_without_graph_seeds_only() {
        let mut t = Tensor::from_vec(vec![5.0], false);
        backward(&mut t, None);
        assert!(t.grad().is_some()); // seeded, nothing to propagate to
    }
}
