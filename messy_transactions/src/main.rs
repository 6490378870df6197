use anyhow::{Context, Result};
use messy_transactions::DatasetBuilder;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let builder = DatasetBuilder::new().context("failed to build the product catalog")?;
    let output = builder.generation_config().output_path.clone();
    info!(
        transactions = builder.generation_config().transactions,
        seed = builder.generation_config().seed,
        "generating dataset"
    );

    let mut dataset = builder.run().context("failed to generate the dataset")?;
    dataset
        .write_csv(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Successfully saved '{}' with {} rows.",
        output.display(),
        dataset.dirty().height()
    );
    dataset.report().summary();
    Ok(())
}
