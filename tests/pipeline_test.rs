// End-to-end pipeline test: fine-tune a tiny classifier on a
// 10-row training CSV, score a 5-row test CSV, and check the
// written predictions table. Runs on the CPU backend with a
// deliberately small model so the whole round trip stays fast.

use std::io::Write;
use std::path::Path;

use news_classifier::application::predict_use_case::PredictUseCase;
use news_classifier::application::train_use_case::{TrainConfig, TrainUseCase};

fn write_file(path: &Path, contents: &str) {
    let mut f = std::fs::File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

const TRAIN_CSV: &str = "\
Class Index,Title,Description
1,Peace talks resume,Diplomats met again in Geneva this week
2,Cup final thriller,The match went to penalties after extra time
3,Stocks rally hard,Wall Street closed sharply higher on earnings
4,New chip unveiled,The processor doubles performance per watt
1,Border accord signed,Neighboring countries agreed on new crossings
2,Sprinter breaks record,The final was decided by three hundredths
3,Merger announced,Two retail giants agreed to combine operations
4,Telescope launched,The observatory will map distant galaxies
1,Summit concludes,Leaders issued a joint statement on trade
2,The is an,was were being
";

const TEST_CSV: &str = "\
Class Index,Title,Description
1,Ceasefire extended,Mediators reported progress in the talks
2,Champions crowned,The season ended with a dramatic comeback
3,Shares slide,Investors reacted to weak quarterly guidance
4,Robot walks,Engineers demonstrated a new balancing gait
3,Bank cuts rates,The central bank lowered its key rate
";

#[test]
fn full_pipeline_writes_scored_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let train_csv = dir.path().join("train.csv");
    let test_csv = dir.path().join("test.csv");
    let output_csv = dir.path().join("predictions.csv");
    let checkpoint_dir = dir.path().join("checkpoints");

    write_file(&train_csv, TRAIN_CSV);
    write_file(&test_csv, TEST_CSV);

    let config = TrainConfig {
        train_csv: train_csv.to_str().unwrap().into(),
        checkpoint_dir: checkpoint_dir.to_str().unwrap().into(),
        pretrained_dir: None,
        max_seq_len: 32,
        batch_size: 4,
        epochs: 1,
        lr: 1e-3,
        weight_decay: 0.01,
        warmup_steps: 2,
        val_fraction: 0.2,
        seed: 42,
        num_classes: 4,
        d_model: 16,
        num_heads: 2,
        num_layers: 1,
        d_ff: 32,
        dropout: 0.0,
        vocab_size: 256,
    };

    TrainUseCase::new(config).execute().unwrap();

    // Training artifacts: config, tokenizer, at least one checkpoint
    assert!(checkpoint_dir.join("train_config.json").exists());
    assert!(checkpoint_dir.join("tokenizer.json").exists());
    assert!(checkpoint_dir.join("latest_epoch.json").exists());
    assert!(checkpoint_dir.join("metrics.csv").exists());

    let accuracy = PredictUseCase::new(
        test_csv.to_str().unwrap(),
        checkpoint_dir.to_str().unwrap(),
        output_csv.to_str().unwrap(),
    )
    .execute()
    .unwrap();

    assert!((0.0..=1.0).contains(&accuracy));

    // One output row per test row, classes back in 1-based form
    let text = std::fs::read_to_string(&output_csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Class Index,Title,Description,Predicted Class"
    );

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    for row in rows {
        let predicted: i64 = row.rsplit(',').next().unwrap().parse().unwrap();
        assert!((1..=4).contains(&predicted), "bad class in row: {row}");
    }
}
