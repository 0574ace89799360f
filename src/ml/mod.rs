// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn framework specific code lives here (plus the
// batcher and checkpoint recorder). No other layer touches
// tensors directly, which keeps the rest of the crate testable
// without an accelerator.
//
// What's in this layer:
//
//   model.rs     — transformer encoder classifier:
//                  token + position embeddings, self-attention
//                  blocks with padding masks, masked mean
//                  pooling, linear classification head
//
//   trainer.rs   — fine-tuning loop: AdamW with weight decay,
//                  linear warmup/decay LR schedule, per-epoch
//                  validation and checkpointing
//
//   schedule.rs  — the warmup + linear decay learning-rate
//                  schedule as a pure, testable struct
//
//   predictor.rs — batched inference over the test set,
//                  argmax decoding, accuracy
//
// The backend is chosen at compile time: the CPU ndarray
// backend by default, wgpu behind the `wgpu` feature. Training
// wraps the inner backend in Autodiff; validation and
// prediction run on the inner backend directly.

use burn::prelude::*;

/// Transformer encoder classifier
pub mod model;

/// Fine-tuning loop with validation and checkpointing
pub mod trainer;

/// Warmup + linear decay learning-rate schedule
pub mod schedule;

/// Batched inference and accuracy
pub mod predictor;

#[cfg(feature = "wgpu")]
pub type InnerBackend = burn::backend::Wgpu;
#[cfg(not(feature = "wgpu"))]
pub type InnerBackend = burn::backend::NdArray;

pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;

/// Default device of the selected backend.
pub fn default_device() -> <InnerBackend as Backend>::Device {
    <InnerBackend as Backend>::Device::default()
}
