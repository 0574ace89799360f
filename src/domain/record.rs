// ============================================================
// Layer 3 — News Record Domain Types
// ============================================================
// One struct per pipeline stage:
//
//   NewsRecord        — a raw CSV row (Title, Description,
//                       Class Index), exactly as loaded
//   NormalizedRecord  — title and description merged into one
//                       stopword-filtered `text` field plus a
//                       0-based `label`
//   PredictionRecord  — a test row with the model's 1-based
//                       `Predicted Class` appended; serialized
//                       back to CSV as the terminal artifact
//
// The serde renames bind fields to the exact CSV header names
// of the dataset, so csv + serde handle the tabular mapping.

use serde::{Deserialize, Serialize};

/// A raw news item as read from `train.csv` / `test.csv`.
/// `class_index` is 1-based in the source data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    #[serde(rename = "Class Index")]
    pub class_index: i64,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description")]
    pub description: String,
}

impl NewsRecord {
    pub fn new(class_index: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            class_index,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A record after text normalization and label mapping.
/// `text` may legitimately be empty if every word of the source
/// row was a stopword; downstream stages must tolerate that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Original 1-based class index, kept for output traceability
    pub class_index: i64,

    /// Title + ". " + Description with stopwords removed
    pub text: String,

    /// 0-based class label in [0, num_classes)
    pub label: usize,
}

/// A test record augmented with the model prediction.
/// Field order here defines the output CSV column order:
/// the input schema first, then `Predicted Class`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Class Index")]
    pub class_index: i64,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Predicted Class")]
    pub predicted_class: i64,
}

impl PredictionRecord {
    /// Attach a 1-based predicted class to the original test row.
    pub fn from_record(record: NewsRecord, predicted_class: i64) -> Self {
        Self {
            class_index: record.class_index,
            title: record.title,
            description: record.description,
            predicted_class,
        }
    }
}
