// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns a raw NewsRecord into the single `text` field the
// tokenizer sees:
//
//   1. Concatenate Title + ". " + Description
//   2. Split on whitespace
//   3. Drop every word whose lowercased form is a stopword
//   4. Rejoin the survivors with single spaces
//
// Word order is preserved. If every word was a stopword the
// result is the empty string — that is a valid record and
// flows through tokenization as an all-padding sequence.
//
// The stopword set is built once at construction and injected
// wherever it is needed; nothing in this crate reads it from
// process-global state.

use std::collections::HashSet;

use crate::domain::record::NewsRecord;
use crate::data::stopwords;

pub struct TextNormalizer {
    stopwords: HashSet<&'static str>,
}

impl TextNormalizer {
    /// Build a normalizer over the embedded English stopword list.
    pub fn english() -> Self {
        Self {
            stopwords: stopwords::ENGLISH.iter().copied().collect(),
        }
    }

    /// Merge the two text columns and strip stopwords.
    pub fn normalize(&self, record: &NewsRecord) -> String {
        let combined = format!("{}. {}", record.title, record.description);
        self.remove_stopwords(&combined)
    }

    /// Drop whitespace-delimited words whose lowercase form is in
    /// the stopword set, keeping the rest in their original order
    /// and casing.
    pub fn remove_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.stopwords.contains(word.to_lowercase().as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
