// ============================================================
// Layer 5 — Predictor
// ============================================================
// Loads the latest checkpoint and runs the classifier over a
// dataset in batches, producing one 0-based label per sample
// via argmax over the class logits.
//
// The data loader is built WITHOUT shuffling, so predictions
// come back in the dataset's input order — required for writing
// the predictions CSV row-aligned with the test file.

use anyhow::Result;
use burn::{data::dataloader::DataLoaderBuilder, prelude::*};

use crate::data::{batcher::NewsBatcher, dataset::NewsDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{TextClassifier, TextClassifierConfig};
use crate::ml::{default_device, InnerBackend};

pub struct Predictor {
    model:  TextClassifier<InnerBackend>,
    device: <InnerBackend as Backend>::Device,
}

impl Predictor {
    /// Rebuild the trained model from the checkpoint directory.
    /// Dropout is set to zero — inference is deterministic.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = default_device();
        let cfg    = ckpt_manager.load_config()?;
        let model_cfg = TextClassifierConfig::new(
            cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
            cfg.num_heads, cfg.num_layers, cfg.d_ff, 0.0,
            cfg.num_classes,
        );
        let model: TextClassifier<InnerBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, device })
    }

    /// Predict a 0-based label for every sample, in dataset order.
    pub fn predict_labels(&self, dataset: NewsDataset, batch_size: usize) -> Result<Vec<usize>> {
        let expected = dataset.sample_count();

        let batcher = NewsBatcher::<InnerBackend>::new(self.device.clone());
        let loader  = DataLoaderBuilder::new(batcher)
            .batch_size(batch_size)
            .num_workers(1)
            .build(dataset);

        let mut predictions = Vec::with_capacity(expected);
        for batch in loader.iter() {
            let logits = self.model.forward(batch.input_ids, batch.attention_mask);
            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            let values: Vec<i64> = predicted.into_data().convert::<i64>().value;
            predictions.extend(values.into_iter().map(|v| v as usize));
        }

        debug_assert_eq!(predictions.len(), expected);
        Ok(predictions)
    }
}

/// Fraction of positions where the prediction matches the truth.
/// Empty input yields 0.0.
pub fn accuracy(predicted: &[usize], truth: &[usize]) -> f64 {
    if predicted.is_empty() || predicted.len() != truth.len() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(truth)
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / predicted.len() as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_matching_positions() {
        assert_eq!(accuracy(&[0, 1, 2, 3], &[0, 1, 2, 3]), 1.0);
        assert_eq!(accuracy(&[0, 1, 2, 3], &[0, 1, 0, 0]), 0.5);
        assert_eq!(accuracy(&[1, 1], &[0, 0]), 0.0);
    }

    #[test]
    fn accuracy_of_empty_or_mismatched_input_is_zero() {
        assert_eq!(accuracy(&[], &[]), 0.0);
        assert_eq!(accuracy(&[1], &[1, 2]), 0.0);
    }
}
