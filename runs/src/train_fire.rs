//! Train the fire/smoke detector from sensor readings.
//!
//! Expects a CSV with `smoke,flame,gas,label` columns, trains a 3-18-1
//! network with AdamW under cosine decay, reports dev metrics per epoch and
//! test accuracy at the end, then exports the model in plain and quantized
//! form.
use anyhow::Result;
use clap::Parser;
use firenet::{
    evaluate, export, split, AdamW, CosineDecay, EpochStats, RunConfig, ShallowNet,
    SplitFractions, Table, TestRange, Trainer,
};
use tracing_subscriber::EnvFilter;

const FEATURES: [&str; 3] = ["smoke", "flame", "gas"];
const LABEL: &str = "label";
const HIDDEN: usize = 18;
const WEIGHT_DECAY: f64 = 0.004;

#[derive(Parser, Debug)]
#[command(about = "Train the fire/smoke sensor model")]
struct Args {
    /// Batch size.
    #[arg(long, default_value_t = 32)]
    batch_size: usize,
    /// Number of epochs.
    #[arg(long, default_value_t = 30)]
    epochs: usize,
    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Initial learning rate.
    #[arg(long, default_value_t = 0.001)]
    learning_rate: f64,
    /// Input CSV with smoke,flame,gas,label columns.
    #[arg(long, default_value = "all_data.csv")]
    data: String,
    /// Output model path.
    #[arg(long, default_value = "model_real.fnet")]
    model: String,
    /// Reproduce the historical split where test reuses dev's lower bound.
    #[arg(long)]
    legacy_test_split: bool,
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

    let table = Table::from_csv(&args.data)?;
    tracing::info!(rows = table.len(), data = %args.data, "loaded dataset");

    let test_range = if args.legacy_test_split {
        TestRange::FromDevStart
    } else {
        TestRange::AfterDev
    };
    let parts = split(&table, config.seed, SplitFractions::new(0.75, 0.05), test_range)?;
    let (train_x, train_y) = parts.train.project(&FEATURES, LABEL)?;
    let (dev_x, dev_y) = parts.dev.project(&FEATURES, LABEL)?;
    let (test_x, test_y) = parts.test.project(&FEATURES, LABEL)?;

    let mut model = ShallowNet::seeded(FEATURES.len(), HIDDEN, config.seed);
    let mut optimizer = AdamW::new(&model, WEIGHT_DECAY);

    // Schedule horizon uses floor division, so the trailing short batch of
    // each epoch runs at the decayed floor of zero.
    let steps_per_epoch = (train_x.len() / config.batch_size) as u64;
    let total_steps = steps_per_epoch * config.epochs as u64;
    let schedule = CosineDecay::new(config.learning_rate, total_steps);

    let trainer = Trainer::new(&config, schedule)?;
    trainer.fit(
        &mut model,
        &mut optimizer,
        &train_x,
        &train_y,
        &dev_x,
        &dev_y,
        &mut |stats: &EpochStats| {
            println!(
                "Epoch {:02}: learning rate = {:.8}",
                stats.epoch, stats.learning_rate
            );
        },
    )?;

    let test = evaluate(&model, &test_x, &test_y)?;
    println!("Test accuracy: {:.2}", test.accuracy);

    export::save(&model, &args.model)?;
    let quantized_path = format!("{}q", args.model);
    export::save_quantized(&model, &quantized_path)?;
    tracing::info!(model = %args.model, quantized = %quantized_path, "exported");
    Ok(())
}
