// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full fine-tuning pipeline in order:
//
//   Step 1: Load train.csv             (Layer 4 - data)
//   Step 2: Normalize text + labels    (Layer 4 - data)
//   Step 3: Split train/validation     (Layer 4 - data)
//   Step 4: Load/build tokenizer       (Layer 6 - infra)
//   Step 5: Encode both subsets        (Layer 4 - data)
//   Step 6: Build datasets             (Layer 4 - data)
//   Step 7: Save config                (Layer 6 - infra)
//   Step 8: Run fine-tuning loop       (Layer 5 - ml)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::NewsDataset,
    encoder::TextEncoder,
    loader::CsvSource,
    normalizer::TextNormalizer,
    splitter::split_train_val,
};
use crate::domain::error::PipelineError;
use crate::domain::labels;
use crate::domain::record::NormalizedRecord;
use crate::domain::traits::RecordSource;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a fine-tuning run. Serializable so it
// can be saved beside the checkpoints and reloaded at prediction
// time to rebuild the exact model architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_csv:      String,
    pub checkpoint_dir: String,
    /// Directory holding pretrained starting weights, if any
    pub pretrained_dir: Option<String>,
    pub max_seq_len:    usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub weight_decay:   f64,
    pub warmup_steps:   usize,
    pub val_fraction:   f64,
    pub seed:           u64,
    pub num_classes:    usize,
    pub d_model:        usize,
    pub num_heads:      usize,
    pub num_layers:     usize,
    pub d_ff:           usize,
    pub dropout:        f64,
    pub vocab_size:     usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_csv:      "train.csv".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            pretrained_dir: None,
            max_seq_len:    512,
            batch_size:     8,
            epochs:         3,
            lr:             5e-5,
            weight_decay:   0.01,
            warmup_steps:   500,
            val_fraction:   0.2,
            seed:           42,
            num_classes:    4,
            d_model:        256,
            num_heads:      8,
            num_layers:     6,
            d_ff:           1024,
            dropout:        0.1,
            vocab_size:     30522,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full fine-tuning pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the training table ──────────────────────────────────
        tracing::info!("Loading training data from '{}'", cfg.train_csv);
        let records = CsvSource::new(&cfg.train_csv).load_all()?;

        // ── Step 2: Normalize text, map labels ───────────────────────────────
        // Title + ". " + Description, stopwords stripped, class
        // index shifted to a 0-based label. An out-of-range class
        // index aborts here, before anything is trained.
        let normalizer = TextNormalizer::english();
        let normalized = normalize_records(&records, &normalizer, cfg.num_classes)?;
        tracing::info!("Normalized {} records", normalized.len());

        // ── Step 3: Seeded train/validation split ────────────────────────────
        let (train_records, val_records) =
            split_train_val(normalized, cfg.val_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} validation",
            train_records.len(),
            val_records.len()
        );

        // ── Step 4: Load or build the tokenizer ──────────────────────────────
        // A pretrained tokenizer.json in the checkpoint dir wins;
        // otherwise a vocabulary is built from the training texts.
        let train_texts: Vec<String> =
            train_records.iter().map(|r| r.text.clone()).collect();
        let tok_store = TokenizerStore::new(&cfg.checkpoint_dir);
        let tokenizer = tok_store.load_or_build(&train_texts, cfg.vocab_size)?;

        // ── Step 5: Encode both subsets ──────────────────────────────────────
        let encoder = TextEncoder::new(tokenizer, cfg.max_seq_len);
        let val_texts: Vec<String> =
            val_records.iter().map(|r| r.text.clone()).collect();

        let train_encodings = encoder.encode_batch(&train_texts)?;
        let val_encodings   = encoder.encode_batch(&val_texts)?;

        // ── Step 6: Build validated Burn datasets ────────────────────────────
        let train_dataset = NewsDataset::from_encodings(
            train_encodings,
            train_records.iter().map(|r| r.label).collect(),
        )?;
        let val_dataset = NewsDataset::from_encodings(
            val_encodings,
            val_records.iter().map(|r| r.label).collect(),
        )?;
        tracing::info!(
            "Datasets ready: {} train samples, {} validation samples",
            train_dataset.sample_count(),
            val_dataset.sample_count()
        );

        // ── Step 7: Save config for prediction ───────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 8: Run the fine-tuning loop (Layer 5) ───────────────────────
        run_training(cfg, train_dataset, val_dataset, ckpt_manager)
            .map_err(|e| PipelineError::Training(e.to_string()))?;

        Ok(())
    }
}

/// Normalize every record and validate its class index.
pub fn normalize_records(
    records:     &[crate::domain::record::NewsRecord],
    normalizer:  &TextNormalizer,
    num_classes: usize,
) -> Result<Vec<NormalizedRecord>, PipelineError> {
    records
        .iter()
        .map(|record| {
            let label = labels::to_zero_based(record.class_index, num_classes)?;
            Ok(NormalizedRecord {
                class_index: record.class_index,
                text: normalizer.normalize(record),
                label,
            })
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::NewsRecord;

    #[test]
    fn normalization_produces_zero_based_labels() {
        let records = vec![
            NewsRecord::new(1, "Peace talks", "Diplomats met in Geneva"),
            NewsRecord::new(4, "Chip launch", "A new processor was announced"),
        ];
        let normalized =
            normalize_records(&records, &TextNormalizer::english(), 4).unwrap();
        assert_eq!(normalized[0].label, 0);
        assert_eq!(normalized[1].label, 3);
        assert!(normalized.iter().all(|r| r.label < 4));
    }

    #[test]
    fn out_of_range_class_index_fails_fast() {
        let records = vec![NewsRecord::new(5, "Bad row", "Class index too large")];
        let err =
            normalize_records(&records, &TextNormalizer::english(), 4).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidLabel { class_index: 5, .. }));
    }

    #[test]
    fn normalized_text_contains_no_stopwords() {
        let records = vec![NewsRecord::new(2, "The final was tense", "It went to penalties")];
        let normalizer = TextNormalizer::english();
        let normalized = normalize_records(&records, &normalizer, 4).unwrap();
        // Re-applying stopword removal must be a no-op
        assert_eq!(
            normalizer.remove_stopwords(&normalized[0].text),
            normalized[0].text
        );
    }
}
