// ============================================================
// Layer 4 — CSV Loader / Writer
// ============================================================
// Reads the train and test tables and writes the predictions
// table. The csv crate handles quoting and the header row;
// serde maps columns to NewsRecord fields by header name, so a
// file missing `Title`, `Description` or `Class Index` fails on
// the first row with a clear message instead of producing
// half-parsed records.
//
// Row order is preserved exactly: the predictions file must be
// writable in the same order the test rows came in.

use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;
use crate::domain::record::{NewsRecord, PredictionRecord};
use crate::domain::traits::RecordSource;

/// Loads news records from one delimited file with a header row.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_error(&self, reason: impl ToString) -> PipelineError {
        PipelineError::DataLoad {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl RecordSource for CsvSource {
    /// Read every row into a NewsRecord, preserving file order.
    /// Any malformed row aborts the load — a silently skipped
    /// row would shift every index downstream.
    fn load_all(&self) -> Result<Vec<NewsRecord>, PipelineError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| self.load_error(e))?;

        let mut records = Vec::new();
        for row in reader.deserialize::<NewsRecord>() {
            let record = row.map_err(|e| self.load_error(e))?;
            records.push(record);
        }

        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Write the predictions table: the test schema plus one
/// `Predicted Class` column, in the same row order as the input.
pub fn write_predictions(
    path: impl AsRef<Path>,
    records: &[PredictionRecord],
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| PipelineError::DataLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    for record in records {
        writer.serialize(record).map_err(|e| PipelineError::DataLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    writer.flush().map_err(|e| PipelineError::DataLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!("Wrote {} predictions to '{}'", records.len(), path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_rows_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "train.csv",
            "Class Index,Title,Description\n\
             3,Market rally,Stocks rose sharply today\n\
             1,Peace talks,Diplomats met in Geneva\n",
        );

        let records = CsvSource::new(path).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].class_index, 3);
        assert_eq!(records[0].title, "Market rally");
        assert_eq!(records[1].description, "Diplomats met in Geneva");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let source = CsvSource::new("no/such/file.csv");
        let err = source.load_all().unwrap_err();
        assert!(matches!(err, PipelineError::DataLoad { .. }));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        // No Description column
        let path = write_csv(
            dir.path(),
            "bad.csv",
            "Class Index,Title\n1,Some headline\n",
        );
        let err = CsvSource::new(path).load_all().unwrap_err();
        assert!(matches!(err, PipelineError::DataLoad { .. }));
    }

    #[test]
    fn predictions_round_trip_with_extra_column() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("predictions.csv");

        let records = vec![PredictionRecord {
            class_index: 2,
            title: "Cup final".into(),
            description: "The match went to penalties".into(),
            predicted_class: 2,
        }];
        write_predictions(&out, &records).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Class Index,Title,Description,Predicted Class"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2,Cup final,The match went to penalties,2"
        );
    }
}
