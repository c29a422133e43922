//! The training loop

use crate::data::BatchSource;
use crate::model::{Mode, Model};
use crate::optim::{Adam, Optimizer};
use crate::train::progress::log_progress;
use crate::train::{LossFn, MaskedCrossEntropyLoss, MetricsTracker, TrainConfig};
use crate::Result;

/// Run the supervised training loop.
///
/// Per step: draw a batch from `ds_train`, move it to the configured
/// device, forward through the model, compute masked cross-entropy over
/// non-masked positions, backpropagate, apply one Adam update, clear the
/// gradients, record the scalar loss. Every `log_every` steps a progress
/// line is written to standard output.
///
/// Returns the model (same identity, parameters updated in place through
/// the shared handles) and a tracker whose `"loss"` series holds exactly
/// `max_steps` values in step order. With `max_steps == 0` the model is
/// returned untouched and the tracker is empty.
///
/// The first failure from the batch source or a device transfer aborts the
/// run, leaving the model as of the last completed step; nothing is caught
/// or retried.
///
/// # Panics
///
/// Panics when `batch_size` or `lr` is not positive, on a logits/targets
/// shape mismatch in the loss, and when `log_every` is zero (the progress
/// check computes `step % log_every`).
pub fn train<M: Model, S: BatchSource>(
    mut model: M,
    ds_train: &mut S,
    config: &TrainConfig,
) -> Result<(M, MetricsTracker)> {
    assert!(config.batch_size > 0, "batch_size must be positive");
    assert!(config.lr > 0.0, "learning rate must be positive");

    model.to_device(config.device)?;
    model.set_mode(Mode::Train);

    let mut params = model.parameters();
    let mut optimizer = Adam::default_params(config.lr);
    let loss_fn = MaskedCrossEntropyLoss::new(model.num_classes());
    let mut metrics = MetricsTracker::new();

    for step in 0..config.max_steps {
        let batch = ds_train.get_batch(config.batch_size)?;
        let batch = batch.to_device(config.device)?;

        let logits = model.forward(&batch.inputs);
        let loss = loss_fn.forward(&logits, &batch.targets);
        let loss_val = loss.data()[0];

        if let Some(op) = loss.backward_op() {
            op.backward();
        }
        optimizer.step(&mut params);
        optimizer.zero_grad(&mut params);

        metrics.record("loss", loss_val);
        metrics.increment_step();

        if step % config.log_every == 0 {
            log_progress(step, config.max_steps, &metrics, Mode::Train);
        }
    }

    Ok((model, metrics))
}
