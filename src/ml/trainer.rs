// ============================================================
// Layer 5 — Fine-Tuning Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and
// AdamW.
//
// Backend split:
//   - Training uses TrainBackend (Autodiff<inner>) for gradients
//   - model.valid() returns the model on the inner backend
//   - the validation batcher must also use the inner backend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// The learning rate follows a linear warmup/decay schedule and
// is passed to the optimizer at every step. Weight decay is
// configured on AdamW itself.
//
// Side effects per epoch: one checkpoint file, one metrics CSV
// row, one progress line on stdout.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamWConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::NewsBatcher, dataset::NewsDataset};
use crate::infra::checkpoint::{load_pretrained, CheckpointManager};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{TextClassifier, TextClassifierConfig};
use crate::ml::schedule::LinearWarmupSchedule;
use crate::ml::{default_device, InnerBackend, TrainBackend};

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: NewsDataset,
    val_dataset:   NewsDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<()> {
    let device = default_device();
    tracing::info!("Using device: {:?}", device);
    train_loop(cfg, train_dataset, val_dataset, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: NewsDataset,
    val_dataset:   NewsDataset,
    ckpt_manager:  CheckpointManager,
    device:        <InnerBackend as Backend>::Device,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = TextClassifierConfig::new(
        cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff, cfg.dropout,
        cfg.num_classes,
    );
    let mut model: TextClassifier<TrainBackend> = model_cfg.init(&device);

    // Start from pretrained weights when a directory is configured;
    // otherwise fine-tuning degrades to training from scratch.
    if let Some(dir) = &cfg.pretrained_dir {
        model = load_pretrained(std::path::Path::new(dir), model, &device)?;
        tracing::info!("Initialized model from pretrained weights in '{dir}'");
    } else {
        tracing::warn!("No pretrained weights configured; training from fresh initialization");
    }
    tracing::info!("Model ready: {} layers, d_model={}", cfg.num_layers, cfg.d_model);

    // ── AdamW optimizer ───────────────────────────────────────────────────────
    // Decoupled weight decay per Loshchilov & Hutter (2019)
    let optim_cfg = AdamWConfig::new().with_weight_decay(cfg.weight_decay as f32);
    let mut optim = optim_cfg.init();

    // ── Learning-rate schedule ────────────────────────────────────────────────
    let steps_per_epoch =
        (train_dataset.sample_count() + cfg.batch_size - 1) / cfg.batch_size.max(1);
    let total_steps = steps_per_epoch * cfg.epochs;
    let schedule = LinearWarmupSchedule::new(cfg.lr, cfg.warmup_steps, total_steps);

    // ── Training data loader (autodiff backend) ───────────────────────────────
    let train_batcher = NewsBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend — no autodiff overhead) ─────────
    let val_batcher = NewsBatcher::<InnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
    let mut step = 0usize;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(
                batch.input_ids,
                batch.attention_mask,
                batch.labels,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + AdamW update at the scheduled LR
            let lr = schedule.lr_at(step);
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);
            step += 1;
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → TextClassifier<InnerBackend>,
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let (loss, logits) = model_valid.forward_loss(
                batch.input_ids,
                batch.attention_mask,
                batch.labels.clone(),
            );

            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with the [batch] label tensor
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches   > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;
        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete");
    Ok(())
}
