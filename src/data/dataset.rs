// ============================================================
// Layer 4 — News Dataset
// ============================================================
// Wraps tokenized encodings plus labels behind Burn's Dataset
// trait so the DataLoader can call .get(index) and .len().
//
// All shape validation happens in the constructor: a sample
// with empty input_ids, a mask/id length mismatch, or a ragged
// batch is rejected before training starts. A malformed sample
// discovered per-access would silently corrupt every downstream
// training step, so construction is the only place these checks
// can live.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::encoder::Encoding;
use crate::domain::error::PipelineError;

/// One fully tokenized and padded classification sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSample {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    /// 0-based class label
    pub label: usize,
}

#[derive(Debug)]
pub struct NewsDataset {
    samples: Vec<NewsSample>,
}

impl NewsDataset {
    /// Build a dataset, validating every sample up front.
    pub fn new(samples: Vec<NewsSample>) -> Result<Self, PipelineError> {
        let seq_len = samples.first().map(|s| s.input_ids.len());

        for (index, sample) in samples.iter().enumerate() {
            if sample.input_ids.is_empty() {
                return Err(PipelineError::InvalidSample {
                    index,
                    reason: "input_ids is empty".into(),
                });
            }
            if sample.input_ids.len() != sample.attention_mask.len() {
                return Err(PipelineError::InvalidSample {
                    index,
                    reason: format!(
                        "input_ids length {} != attention_mask length {}",
                        sample.input_ids.len(),
                        sample.attention_mask.len()
                    ),
                });
            }
            // The batcher stacks rows into a rectangular tensor
            if Some(sample.input_ids.len()) != seq_len {
                return Err(PipelineError::InvalidSample {
                    index,
                    reason: format!(
                        "sequence length {} differs from first sample's {}",
                        sample.input_ids.len(),
                        seq_len.unwrap_or(0)
                    ),
                });
            }
        }

        Ok(Self { samples })
    }

    /// Pair encodings with their labels into a validated dataset.
    pub fn from_encodings(
        encodings: Vec<Encoding>,
        labels: Vec<usize>,
    ) -> Result<Self, PipelineError> {
        if encodings.len() != labels.len() {
            return Err(PipelineError::InvalidSample {
                index: encodings.len().min(labels.len()),
                reason: format!(
                    "{} encodings but {} labels",
                    encodings.len(),
                    labels.len()
                ),
            });
        }

        let samples = encodings
            .into_iter()
            .zip(labels)
            .map(|(enc, label)| NewsSample {
                input_ids: enc.input_ids,
                attention_mask: enc.attention_mask,
                label,
            })
            .collect();

        Self::new(samples)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Checked access with a typed out-of-range error.
    pub fn try_get(&self, index: usize) -> Result<&NewsSample, PipelineError> {
        self.samples.get(index).ok_or(PipelineError::IndexOutOfRange {
            index,
            len: self.samples.len(),
        })
    }

}

impl Dataset<NewsSample> for NewsDataset {
    fn get(&self, index: usize) -> Option<NewsSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
