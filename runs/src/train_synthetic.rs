//! Train the synthetic analog of the fire model.
//!
//! Generates `data.csv` when it is missing (10 000 rows, three uniform
//! features, rule-based labels), trains a 3-10-1 network at a constant rate,
//! and exports the result.
use anyhow::Result;
use clap::Parser;
use firenet::{
    evaluate, export, generate_synthetic, split, AdamW, Constant, EpochStats, RunConfig,
    ShallowNet, SplitFractions, Table, TestRange, Trainer,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const FEATURES: [&str; 3] = ["x1", "x2", "x3"];
const LABEL: &str = "labels";
const HIDDEN: usize = 10;
const GENERATED_ROWS: usize = 10_000;

#[derive(Parser, Debug)]
#[command(about = "Train the synthetic model on generated data")]
struct Args {
    /// Batch size.
    #[arg(long, default_value_t = 32)]
    batch_size: usize,
    /// Number of epochs.
    #[arg(long, default_value_t = 10)]
    epochs: usize,
    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Initial learning rate.
    #[arg(long, default_value_t = 0.001)]
    learning_rate: f64,
    /// Input CSV; generated with the rule labeller when absent.
    #[arg(long, default_value = "data.csv")]
    data: String,
    /// Output model path.
    #[arg(long, default_value = "model.fnet")]
    model: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let config = RunConfig {
        batch_size: args.batch_size,
        epochs: args.epochs,
        seed: args.seed,
        learning_rate: args.learning_rate,
    };
    config.validate()?;

    let table = if Path::new(&args.data).exists() {
        Table::from_csv(&args.data)?
    } else {
        let generated = generate_synthetic(GENERATED_ROWS, config.seed);
        generated.to_csv(&args.data)?;
        tracing::info!(rows = generated.len(), data = %args.data, "generated dataset");
        generated
    };

    let parts = split(
        &table,
        config.seed,
        SplitFractions::new(0.70, 0.15),
        TestRange::AfterDev,
    )?;
    let (train_x, train_y) = parts.train.project(&FEATURES, LABEL)?;
    let (dev_x, dev_y) = parts.dev.project(&FEATURES, LABEL)?;
    let (test_x, test_y) = parts.test.project(&FEATURES, LABEL)?;

    let mut model = ShallowNet::seeded(FEATURES.len(), HIDDEN, config.seed);
    let mut optimizer = AdamW::new(&model, 0.0);
    let trainer = Trainer::new(&config, Constant::new(config.learning_rate))?;
    trainer.fit(
        &mut model,
        &mut optimizer,
        &train_x,
        &train_y,
        &dev_x,
        &dev_y,
        &mut |stats: &EpochStats| {
            println!(
                "Epoch {:02}: val_loss = {:.4}, val_accuracy = {:.4}",
                stats.epoch, stats.val_loss, stats.val_accuracy
            );
        },
    )?;

    let test = evaluate(&model, &test_x, &test_y)?;
    println!("Test accuracy: {:.2}", test.accuracy);

    export::save(&model, &args.model)?;
    export::save_quantized(&model, &format!("{}q", args.model))?;
    Ok(())
}
