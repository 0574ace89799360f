// ============================================================
// Layer 3 — Pipeline Error Taxonomy
// ============================================================
// Every stage-local failure mode has a named variant so callers
// can see at a glance which stage aborted the run. The policy
// is fail-fast: validation errors stop the pipeline before any
// output file is written; framework failures (tokenizer, Burn)
// are wrapped with their message and propagate unchanged.
//
// The application layer works in anyhow::Result, so these
// convert via the std::error::Error impl that thiserror derives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file missing, unreadable, or missing required columns.
    #[error("failed to load data from '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    /// Class index outside 1..=num_classes.
    #[error("class index {class_index} outside valid range 1..={num_classes}")]
    InvalidLabel { class_index: i64, num_classes: usize },

    /// External tokenizer failure.
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// External training-loop failure.
    #[error("training failed: {0}")]
    Training(String),

    /// Dataset accessed outside [0, len).
    #[error("index {index} out of range for dataset of {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    /// Dataset construction rejected a malformed sample.
    /// Raised at build time so a broken encoding can never reach
    /// the training loop.
    #[error("invalid sample at index {index}: {reason}")]
    InvalidSample { index: usize, reason: String },
}
