// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Manages the subword tokenizer the pipeline depends on.
//
// Preferred path: a pretrained `tokenizer.json` (for example
// exported from bert-base-uncased) already sitting in the
// checkpoint directory. Its vocabulary is fixed, so token ids
// are stable across training and prediction runs.
//
// Fallback: no tokenizer file exists yet. Then a word-level
// vocabulary is built from the training corpus, written in the
// HuggingFace tokenizer JSON format, and loaded back — which
// guarantees the exact same file is read at prediction time.
// Ids are assigned contiguously after the special tokens so
// every id stays below the configured vocabulary size.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load an existing tokenizer or build a new one from texts.
    pub fn load_or_build(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }

    /// Build a word-level vocabulary from the corpus and write a
    /// valid tokenizer JSON.
    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir).ok();

        // ── Step 1: Count word frequencies over the corpus ────────────────────
        use std::collections::HashMap;
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text.split_whitespace() {
                // The tokenizer's normalizer lowercases too, so the
                // vocabulary must be lowercase to match
                let w = word.to_lowercase();
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Most frequent words first; reserve 4 ids for special tokens
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let max_words = vocab_size.saturating_sub(4);
        words.truncate(max_words);

        // ── Step 2: Assign contiguous ids after the special tokens ────────────
        // [PAD] must stay at id 0 — the encoder pads with 0.
        let mut vocab = serde_json::json!({
            "[PAD]": 0,
            "[UNK]": 1,
            "[CLS]": 2,
            "[SEP]": 3,
        });

        let mut next_id = 4usize;
        for (word, _) in &words {
            if vocab.get(word.as_str()).is_none() {
                vocab[word.as_str()] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: Write the tokenizer JSON in HuggingFace format ────────────
        // This is the layout Tokenizer::from_file() expects
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 2, "content": "[CLS]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 3, "content": "[SEP]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(
            &tok_path,
            serde_json::to_string_pretty(&tokenizer_json)?
        ).with_context(|| "Cannot write tokenizer JSON")?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            next_id,
            tok_path.display()
        );

        // Load back as a proper Tokenizer instance
        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "stocks rallied sharply today".into(),
            "stocks fell after earnings".into(),
            "rocket reached orbit".into(),
        ]
    }

    #[test]
    fn builds_vocabulary_with_ids_below_budget() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tokenizer = store.load_or_build(&corpus(), 100).unwrap();

        let encoded = tokenizer.encode("stocks rallied", false).unwrap();
        assert_eq!(encoded.get_ids().len(), 2);
        assert!(encoded.get_ids().iter().all(|&id| (id as usize) < 100));
    }

    #[test]
    fn second_load_reuses_saved_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());

        let first  = store.load_or_build(&corpus(), 100).unwrap();
        let second = store.load_or_build(&[], 100).unwrap();

        let a = first.encode("rocket orbit", false).unwrap();
        let b = second.encode("rocket orbit", false).unwrap();
        assert_eq!(a.get_ids(), b.get_ids());
    }

    #[test]
    fn unknown_words_map_to_unk() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tokenizer = store.load_or_build(&corpus(), 100).unwrap();

        let encoded = tokenizer.encode("zeppelin", false).unwrap();
        assert_eq!(encoded.get_ids(), &[1]);
    }
}
