// ============================================================
// news-classifier
// ============================================================
// Fine-tunes a transformer text classifier on a 4-class news
// dataset (Title / Description / Class Index CSV schema).
//
// Layer map (top depends on bottom, never the reverse):
//
//   Layer 1  cli          — clap argument parsing, dispatch
//   Layer 2  application  — train / predict use cases
//   Layer 3  domain       — records, labels, errors, traits
//   Layer 4  data         — CSV I/O, normalization, split,
//                           tokenization, dataset, batching
//   Layer 5  ml           — Burn model, training loop,
//                           LR schedule, predictor
//   Layer 6  infra        — checkpoints, tokenizer store,
//                           metrics CSV
//
// All Burn-specific code lives in `ml`, `data::batcher` and
// `infra::checkpoint`; the domain layer is plain Rust.

#![recursion_limit = "256"]

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
