// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// fine-tuning the classifier, or predicting over the test set.
//
// Rules for this layer:
//   - No ML math or tensor code here
//   - No argument parsing or printing of help text (Layer 1)
//   - No direct CSV parsing or recorder calls (Layers 4 and 6)
//   - Only workflow coordination
//
// Data flows strictly downstream through the stages; each stage
// completes fully before the next begins, and a failed stage
// aborts the run before any output file is written.

// The fine-tuning workflow
pub mod train_use_case;

// The test-set prediction workflow
pub mod predict_use_case;
