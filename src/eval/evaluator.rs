//! The evaluation loop

use crate::data::Batch;
use crate::device::Device;
use crate::error::{PracticarError, Result};
use crate::model::{Mode, Model};
use crate::train::{LossFn, MaskedCrossEntropyLoss};

/// Average the masked cross-entropy loss over a validation set.
///
/// Switches the model to [`Mode::Eval`] (a read-only pass: no gradient
/// graph, no parameter updates), iterates `dl_val` exactly once in source
/// order, and returns the accumulated per-batch loss divided by the number
/// of batches.
///
/// An empty validation set has no average; that surfaces as
/// [`PracticarError::EmptyValidation`] rather than a silent `0` or an
/// unsignaled `NaN`. Device-transfer failures propagate unchanged.
pub fn evaluate<M, I>(model: &mut M, dl_val: I, device: Device) -> Result<f32>
where
    M: Model,
    I: IntoIterator<Item = Batch>,
{
    model.to_device(device)?;
    model.set_mode(Mode::Eval);

    let loss_fn = MaskedCrossEntropyLoss::new(model.num_classes());
    let mut running_loss = 0.0f32;
    let mut num_batches = 0usize;

    for batch in dl_val {
        let batch = batch.to_device(device)?;
        let logits = model.forward(&batch.inputs);
        let loss = loss_fn.forward(&logits, &batch.targets);

        running_loss += loss.data()[0];
        num_batches += 1;
    }

    if num_batches == 0 {
        return Err(PracticarError::EmptyValidation);
    }

    Ok(running_loss / num_batches as f32)
}
