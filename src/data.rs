//! Batch data structures and batch sources
//!
//! Targets are class indices stored as `f32`; the sentinel `-1.0` marks a
//! position the loss must ignore (padding mask).

use crate::autograd::Tensor;
use crate::device::Device;
use crate::error::Result;

/// A training batch containing inputs and target class indices.
#[derive(Clone, Debug)]
pub struct Batch {
    /// Input values, consumed opaquely by the model.
    pub inputs: Tensor,
    /// Target class indices aligned with the logits' positions; `-1.0`
    /// excludes a position from the loss.
    pub targets: Tensor,
}

impl Batch {
    /// Create a new batch.
    pub fn new(inputs: Tensor, targets: Tensor) -> Self {
        Self { inputs, targets }
    }

    /// Number of target positions.
    pub fn size(&self) -> usize {
        self.targets.len()
    }

    /// Validate a transfer of both tensors to `device`.
    pub fn to_device(&self, device: Device) -> Result<Batch> {
        Ok(Batch {
            inputs: self.inputs.to_device(device)?,
            targets: self.targets.to_device(device)?,
        })
    }
}

/// A source the training loop draws batches from.
///
/// Sampling policy (with or without replacement, shuffling) is entirely the
/// source's responsibility; the loop imposes no ordering guarantee across
/// steps. A failed draw aborts the run.
pub trait BatchSource {
    /// Sample one batch of the requested size.
    fn get_batch(&mut self, batch_size: usize) -> Result<Batch>;
}

/// In-memory source cycling over pre-built batches in order.
///
/// The requested batch size is ignored: each stored batch already fixes its
/// own size. A single-batch cycle yields the same batch on every draw.
pub struct CyclicBatchSource {
    batches: Vec<Batch>,
    cursor: usize,
}

impl CyclicBatchSource {
    /// Create a source over the given batches.
    ///
    /// # Panics
    ///
    /// Panics when `batches` is empty.
    pub fn new(batches: Vec<Batch>) -> Self {
        assert!(!batches.is_empty(), "CyclicBatchSource needs at least one batch");
        Self { batches, cursor: 0 }
    }
}

impl BatchSource for CyclicBatchSource {
    fn get_batch(&mut self, _batch_size: usize) -> Result<Batch> {
        let batch = self.batches[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.batches.len();
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(value: f32) -> Batch {
        Batch::new(
            Tensor::from_vec(vec![value; 2], false),
            Tensor::from_vec(vec![0.0], false),
        )
    }

    #[test]
    fn test_batch_size() {
        let b = Batch::new(
            Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], false),
            Tensor::from_vec(vec![1.0, 0.0], false),
        );
        assert_eq!(b.size(), 2);
    }

    #[test]
    fn test_batch_to_device_unavailable() {
        assert!(batch(1.0).to_device(Device::Cuda).is_err());
    }

    #[test]
    fn test_cyclic_source_wraps_around() {
        let mut source = CyclicBatchSource::new(vec![batch(1.0), batch(2.0)]);
        assert_eq!(source.get_batch(4).unwrap().inputs.data()[0], 1.0);
        assert_eq!(source.get_batch(4).unwrap().inputs.data()[0], 2.0);
        assert_eq!(source.get_batch(4).unwrap().inputs.data()[0], 1.0);
    }

    #[test]
    #[should_panic(expected = "at least one batch")]
    fn test_cyclic_source_rejects_empty() {
        CyclicBatchSource::new(Vec::new());
    }
}
