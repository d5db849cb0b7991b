use anyhow::{Context, Result};
use bloom_filter::Metrics;
use clap::Parser;
use tracing::{info, warn};

use bloom_harness::logging::init_logging;
use bloom_harness::{generate_datasets, run_comparison, HarnessArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = HarnessArgs::parse();
    init_logging(&args.log_level, args.json_logs)?;

    let options = args.filter_options().context("invalid filter options")?;
    info!(
        error_rate = options.error_rate,
        capacity = options.capacity,
        dataset_size = args.dataset_size,
        "Starting false positive measurement"
    );

    let datasets = generate_datasets(args.dataset_size, args.seed).await?;

    let metrics = Metrics::new();
    let seed = args.seed;
    let report = tokio::task::spawn_blocking(move || {
        run_comparison(&options, seed, &datasets, &metrics)
            .map(|report| report.with_metrics(metrics.snapshot()))
    })
    .await
    .context("comparison task failed")??;

    if report.false_negatives > 0 {
        warn!(
            false_negatives = report.false_negatives,
            "Filter missed values it was given"
        );
    }
    if report.inserted <= report.filter.capacity && !report.within(2.0) {
        warn!(
            observed_fpr = report.observed_fpr,
            configured = report.filter.error_rate,
            "Observed false positive rate is well above the configured rate"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            false_positives = report.false_positives,
            queried = report.queried,
            observed_fpr = report.observed_fpr,
            "Measurement finished"
        );
        println!("{}", report);
    }

    Ok(())
}
