// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any one business
// layer:
//
//   checkpoint.rs      — model weight persistence via Burn's
//                        CompactRecorder, the training-config
//                        JSON, and pretrained-weight loading
//
//   tokenizer_store.rs — tokenizer persistence: loads a
//                        pretrained tokenizer.json when one is
//                        present, otherwise builds a word-level
//                        vocabulary from the training corpus
//                        and saves it, so training and
//                        prediction always share one vocabulary
//
//   metrics.rs         — per-epoch metrics CSV (loss, accuracy)
//                        for learning-curve analysis
//
// Keeping these here prevents duplication across layers and
// makes each one swappable (e.g. file checkpoints for object
// storage) without touching the pipeline.

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer loading, building, and saving
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
