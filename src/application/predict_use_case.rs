// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Runs the trained classifier over the test table:
//
//   Step 1: Load test.csv               (Layer 4 - data)
//   Step 2: Load saved config           (Layer 6 - infra)
//   Step 3: Normalize text + labels     (Layer 4 - data)
//   Step 4: Load the saved tokenizer    (Layer 6 - infra)
//   Step 5: Encode + build dataset      (Layer 4 - data)
//   Step 6: Predict in input order      (Layer 5 - ml)
//   Step 7: Write predictions.csv       (Layer 4 - data)
//
// The output table is the test schema plus a 1-based
// `Predicted Class` column, row-aligned with the input.
// Nothing is written until prediction has fully completed, so
// there is no partially written output to clean up after a
// failure.

use anyhow::Result;

use crate::data::{
    dataset::NewsDataset,
    encoder::TextEncoder,
    loader::{write_predictions, CsvSource},
    normalizer::TextNormalizer,
};
use crate::domain::labels;
use crate::domain::record::PredictionRecord;
use crate::domain::traits::RecordSource;
use crate::application::train_use_case::normalize_records;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::predictor::{accuracy, Predictor};

pub struct PredictUseCase {
    test_csv:       String,
    checkpoint_dir: String,
    output_csv:     String,
}

impl PredictUseCase {
    pub fn new(
        test_csv:       impl Into<String>,
        checkpoint_dir: impl Into<String>,
        output_csv:     impl Into<String>,
    ) -> Self {
        Self {
            test_csv:       test_csv.into(),
            checkpoint_dir: checkpoint_dir.into(),
            output_csv:     output_csv.into(),
        }
    }

    /// Predict over the test set, write the predictions table,
    /// and return the accuracy against the true class indices.
    pub fn execute(&self) -> Result<f64> {
        // ── Step 1: Load the test table ──────────────────────────────────────
        tracing::info!("Loading test data from '{}'", self.test_csv);
        let records = CsvSource::new(&self.test_csv).load_all()?;

        // ── Step 2: Saved hyperparameters drive everything below ─────────────
        let ckpt_manager = CheckpointManager::new(&self.checkpoint_dir);
        let cfg = ckpt_manager.load_config()?;

        // ── Step 3: Same normalization as training ───────────────────────────
        let normalizer = TextNormalizer::english();
        let normalized = normalize_records(&records, &normalizer, cfg.num_classes)?;
        let true_labels: Vec<usize> = normalized.iter().map(|r| r.label).collect();

        // ── Step 4 + 5: Tokenize with the saved vocabulary ───────────────────
        let tokenizer = TokenizerStore::new(&self.checkpoint_dir).load()?;
        let encoder = TextEncoder::new(tokenizer, cfg.max_seq_len);
        let texts: Vec<String> = normalized.iter().map(|r| r.text.clone()).collect();
        let encodings = encoder.encode_batch(&texts)?;
        let dataset = NewsDataset::from_encodings(encodings, true_labels.clone())?;

        // ── Step 6: Batched argmax prediction, input order ───────────────────
        let predictor = Predictor::from_checkpoint(&ckpt_manager)?;
        let predicted_labels = predictor.predict_labels(dataset, cfg.batch_size)?;

        let acc = accuracy(&predicted_labels, &true_labels);

        // ── Step 7: Write the predictions table ──────────────────────────────
        let predictions: Vec<PredictionRecord> = records
            .into_iter()
            .zip(&predicted_labels)
            .map(|(record, &label)| {
                PredictionRecord::from_record(record, labels::to_class_index(label))
            })
            .collect();
        write_predictions(&self.output_csv, &predictions)?;

        println!("Accuracy: {acc:.4}");
        Ok(acc)
    }
}
