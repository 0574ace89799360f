// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types the
// application layer can swap implementations without changes:
//   - CsvSource implements RecordSource for CSV files
//   - a future ParquetSource or JsonlSource could slot in
//     behind the same trait
//
// This is the Dependency Inversion Principle applied with
// Rust's trait system.

use crate::domain::error::PipelineError;
use crate::domain::record::NewsRecord;

/// Any component that can produce the raw news records of a split.
pub trait RecordSource {
    /// Load all records in their on-disk order.
    fn load_all(&self) -> Result<Vec<NewsRecord>, PipelineError>;
}
