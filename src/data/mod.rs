// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw CSV files to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   train.csv / test.csv
//       │
//       ▼
//   CsvSource         → reads rows, validates columns
//       │
//       ▼
//   TextNormalizer    → merges Title + Description,
//                       strips stopwords
//       │
//       ▼
//   labels            → Class Index - 1 → 0-based label
//       │
//       ▼
//   split_train_val   → seeded 80/20 shuffle-then-split
//       │
//       ▼
//   TextEncoder       → tokens → padded input_ids + mask
//       │
//       ▼
//   NewsDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   NewsBatcher       → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step, so each
// step is independently testable and replaceable.

/// Reads and writes the CSV tables
pub mod loader;

/// Merges title/description and removes stopwords
pub mod normalizer;

/// The fixed English stopword list
pub mod stopwords;

/// Deterministic shuffle-and-split into train/validation
pub mod splitter;

/// Adapter over the subword tokenizer
pub mod encoder;

/// Implements Burn's Dataset trait for classification samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
