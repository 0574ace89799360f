// ============================================================
// Layer 4 — Tokenization Adapter
// ============================================================
// Thin adapter over the `tokenizers` crate. The subword
// algorithm itself lives in the tokenizer; this module only
// enforces the shape contract the rest of the pipeline relies
// on:
//
//   - input_ids and attention_mask always have equal length
//   - length never exceeds max_len (truncation)
//   - all encodings in one batch share the same length
//     (padded to the longest sequence in the batch)
//   - attention_mask is 1 for real tokens, 0 for padding
//
// The tokenizer is deterministic for a fixed vocabulary, so
// encoding the same text twice yields identical output.
//
// An empty text encodes to zero real tokens and becomes an
// all-padding sequence — legal input, carrying no information.

use tokenizers::Tokenizer;

use crate::domain::error::PipelineError;

/// Token id used for padding positions.
pub const PAD_ID: u32 = 0;

/// One tokenized text: parallel id and mask sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
}

impl Encoding {
    /// Number of non-padding tokens.
    pub fn real_token_count(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}

pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_len: usize,
}

impl TextEncoder {
    pub fn new(tokenizer: Tokenizer, max_len: usize) -> Self {
        Self { tokenizer, max_len }
    }

    /// Encode a batch of texts into equal-length sequences.
    ///
    /// Each text is tokenized, truncated to `max_len`, then all
    /// sequences are padded with PAD_ID to the longest one in the
    /// batch (never below length 1, so an all-empty batch still
    /// produces well-formed tensors).
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Encoding>, PipelineError> {
        let mut encodings = Vec::with_capacity(texts.len());

        for text in texts {
            let encoded = self
                .tokenizer
                .encode(text.as_str(), false)
                .map_err(|e| PipelineError::Tokenization(e.to_string()))?;

            let mut input_ids: Vec<u32> = encoded.get_ids().to_vec();
            input_ids.truncate(self.max_len);

            let attention_mask = vec![1u32; input_ids.len()];
            encodings.push(Encoding { input_ids, attention_mask });
        }

        // Pad everything to the longest sequence in the batch
        let target_len = encodings
            .iter()
            .map(|e| e.input_ids.len())
            .max()
            .unwrap_or(0)
            .max(1);

        for enc in &mut encodings {
            while enc.input_ids.len() < target_len {
                enc.input_ids.push(PAD_ID);
                enc.attention_mask.push(0);
            }
        }

        Ok(encodings)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::TokenizerStore;

    fn test_encoder(max_len: usize) -> TextEncoder {
        let dir = tempfile::tempdir().unwrap();
        let corpus: Vec<String> = vec![
            "stocks rallied sharply wall street".into(),
            "rocket launched orbit nasa crew".into(),
            "championship final penalties goalkeeper".into(),
        ];
        let tokenizer = TokenizerStore::new(dir.path().to_str().unwrap())
            .load_or_build(&corpus, 1000)
            .unwrap();
        TextEncoder::new(tokenizer, max_len)
    }

    #[test]
    fn ids_and_mask_have_equal_length() {
        let encoder = test_encoder(16);
        let encodings = encoder
            .encode_batch(&["stocks rallied sharply".into(), "nasa crew".into()])
            .unwrap();
        for enc in &encodings {
            assert_eq!(enc.input_ids.len(), enc.attention_mask.len());
            assert!(enc.input_ids.len() <= 16);
        }
    }

    #[test]
    fn batch_is_padded_to_one_shared_length() {
        let encoder = test_encoder(16);
        let encodings = encoder
            .encode_batch(&[
                "stocks rallied sharply wall street".into(),
                "crew".into(),
            ])
            .unwrap();
        assert_eq!(encodings[0].input_ids.len(), encodings[1].input_ids.len());
        // The short text ends in padding
        assert_eq!(*encodings[1].attention_mask.last().unwrap(), 0);
    }

    #[test]
    fn truncates_to_max_len() {
        let encoder = test_encoder(3);
        let encodings = encoder
            .encode_batch(&["stocks rallied sharply wall street orbit crew".into()])
            .unwrap();
        assert_eq!(encodings[0].input_ids.len(), 3);
        assert_eq!(encodings[0].real_token_count(), 3);
    }

    #[test]
    fn encoding_is_deterministic() {
        let encoder = test_encoder(16);
        let a = encoder.encode_batch(&["nasa crew orbit".into()]).unwrap();
        let b = encoder.encode_batch(&["nasa crew orbit".into()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_becomes_all_padding() {
        let encoder = test_encoder(16);
        let encodings = encoder
            .encode_batch(&["".into(), "crew orbit".into()])
            .unwrap();
        assert_eq!(encodings[0].real_token_count(), 0);
        assert_eq!(encodings[0].input_ids.len(), encodings[1].input_ids.len());
        assert!(encodings[0].input_ids.iter().all(|&id| id == PAD_ID));
    }

    #[test]
    fn all_empty_batch_still_has_positive_length() {
        let encoder = test_encoder(16);
        let encodings = encoder.encode_batch(&["".into()]).unwrap();
        assert_eq!(encodings[0].input_ids.len(), 1);
        assert_eq!(encodings[0].real_token_count(), 0);
    }
}
