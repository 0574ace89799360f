// ============================================================
// Layer 3 — Label Mapping
// ============================================================
// The dataset numbers its classes 1..=4 (World, Sports,
// Business, Sci/Tech) while the model's cross-entropy head
// expects 0-based targets. These two functions are the only
// place in the codebase where that shift happens, in either
// direction.

use crate::domain::error::PipelineError;

/// Map a 1-based class index to a 0-based label.
/// Validates the index against the known class count so an
/// out-of-range row aborts the run instead of silently training
/// on a wrong target.
pub fn to_zero_based(class_index: i64, num_classes: usize) -> Result<usize, PipelineError> {
    if class_index < 1 || class_index > num_classes as i64 {
        return Err(PipelineError::InvalidLabel { class_index, num_classes });
    }
    Ok((class_index - 1) as usize)
}

/// Map a 0-based model label back to the dataset's 1-based class index.
pub fn to_class_index(label: usize) -> i64 {
    label as i64 + 1
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_one_based_to_zero_based() {
        assert_eq!(to_zero_based(1, 4).unwrap(), 0);
        assert_eq!(to_zero_based(4, 4).unwrap(), 3);
    }

    #[test]
    fn rejects_zero_and_negative_indices() {
        assert!(to_zero_based(0, 4).is_err());
        assert!(to_zero_based(-3, 4).is_err());
    }

    #[test]
    fn rejects_index_above_class_count() {
        assert!(to_zero_based(5, 4).is_err());
    }

    #[test]
    fn round_trips_through_both_mappings() {
        for class_index in 1..=4 {
            let label = to_zero_based(class_index, 4).unwrap();
            assert!(label < 4);
            assert_eq!(to_class_index(label), class_index);
        }
    }
}
