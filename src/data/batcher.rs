// ============================================================
// Layer 4 — News Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<NewsSample>
// into tensors for one forward pass.
//
//   Input:  Vec of N NewsSamples, each with sequences of length S
//   Output: NewsBatch with [N, S] id/mask tensors and an [N]
//           label tensor
//
// We flatten all input_ids into one long Vec, then reshape:
//   [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// All sequences are already padded to the same length by the
// TextEncoder (enforced by NewsDataset's constructor), so no
// dynamic padding happens here.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::NewsSample;

// ─── NewsBatch ────────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) — generic so the
/// same batcher works on any device.
#[derive(Debug, Clone)]
pub struct NewsBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape: [batch_size, seq_len]
    /// 1 = real token, 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,

    /// 0-based class labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── NewsBatcher ──────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the
/// correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct NewsBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> NewsBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<NewsSample, NewsBatch<B>> for NewsBatcher<B> {
    fn batch(&self, items: Vec<NewsSample>) -> NewsBatch<B> {
        let batch_size = items.len();
        // All sequences share one length (validated at dataset build)
        let seq_len = items[0].input_ids.len();

        // Burn uses i32 for Int tensor construction
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.attention_mask.iter().map(|&x| x as i32))
            .collect();

        let labels_flat: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels_flat.as_slice(), &self.device);

        NewsBatch { input_ids, attention_mask, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn stacks_samples_into_expected_shapes() {
        let device = <NdArray as Backend>::Device::default();
        let batcher = NewsBatcher::<NdArray>::new(device);

        let items = vec![
            NewsSample {
                input_ids: vec![5, 6, 0, 0],
                attention_mask: vec![1, 1, 0, 0],
                label: 3,
            },
            NewsSample {
                input_ids: vec![7, 8, 9, 0],
                attention_mask: vec![1, 1, 1, 0],
                label: 1,
            },
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.input_ids.dims(), [2, 4]);
        assert_eq!(batch.attention_mask.dims(), [2, 4]);
        assert_eq!(batch.labels.dims(), [2]);

        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().value;
        assert_eq!(labels, vec![3, 1]);
    }
}
