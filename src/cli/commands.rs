// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train`, `predict` and `run` subcommands and all
// their configurable flags.
//
// clap's derive macros generate help text, error messages for
// missing args, and type conversion (string → usize, f64, …).

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fine-tune the classifier on a training CSV
    Train(TrainArgs),

    /// Score a test CSV with a trained checkpoint
    Predict(PredictArgs),

    /// Train then predict — the full pipeline in one invocation
    Run(RunArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Training CSV with Title, Description and Class Index columns
    #[arg(long, default_value = "train.csv")]
    pub train_csv: String,

    /// Directory for checkpoints, tokenizer, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory with pretrained starting weights (model.mpk.gz)
    #[arg(long)]
    pub pretrained_dir: Option<String>,

    /// Maximum number of tokens per input sequence
    #[arg(long, default_value_t = 512)]
    pub max_seq_len: usize,

    /// Samples processed together in one forward pass
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 3)]
    pub epochs: usize,

    /// Peak learning rate of the warmup/decay schedule
    #[arg(long, default_value_t = 5e-5)]
    pub lr: f64,

    /// AdamW decoupled weight decay
    #[arg(long, default_value_t = 0.01)]
    pub weight_decay: f64,

    /// Optimizer steps spent ramping the learning rate up
    #[arg(long, default_value_t = 500)]
    pub warmup_steps: usize,

    /// Fraction of the training data held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub val_fraction: f64,

    /// Seed for the train/validation shuffle — same seed, same split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of target classes (the dataset uses 1..=4)
    #[arg(long, default_value_t = 4)]
    pub num_classes: usize,

    /// Hidden dimension of the transformer
    #[arg(long, default_value_t = 256)]
    pub d_model: usize,

    /// Attention heads — d_model must be divisible by this
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    /// Number of stacked encoder layers
    #[arg(long, default_value_t = 6)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    #[arg(long, default_value_t = 1024)]
    pub d_ff: usize,

    /// Dropout probability during training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Upper bound on token ids the embedding table must cover
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 — the
/// application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_csv:      a.train_csv,
            checkpoint_dir: a.checkpoint_dir,
            pretrained_dir: a.pretrained_dir,
            max_seq_len:    a.max_seq_len,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            weight_decay:   a.weight_decay,
            warmup_steps:   a.warmup_steps,
            val_fraction:   a.val_fraction,
            seed:           a.seed,
            num_classes:    a.num_classes,
            d_model:        a.d_model,
            num_heads:      a.num_heads,
            num_layers:     a.num_layers,
            d_ff:           a.d_ff,
            dropout:        a.dropout,
            vocab_size:     a.vocab_size,
        }
    }
}

/// All arguments for the `predict` command.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Test CSV with Title, Description and Class Index columns
    #[arg(long, default_value = "test.csv")]
    pub test_csv: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Where to write the scored table
    #[arg(long, default_value = "predictions.csv")]
    pub output_csv: String,
}

/// Arguments for the `run` command: the full train + predict
/// pipeline. Training flags are shared with `train`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Test CSV to score after training
    #[arg(long, default_value = "test.csv")]
    pub test_csv: String,

    /// Where to write the scored table
    #[arg(long, default_value = "predictions.csv")]
    pub output_csv: String,
}
