use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use transfer_bench::args::common::TransferBenchArgs;
use transfer_bench::args::kind::BenchmarkKindCommand;
use transfer_bench::error::BenchError;
use transfer_bench::runner::BenchmarkRunner;

#[tokio::main]
async fn main() -> Result<(), BenchError> {
    let args = TransferBenchArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runner = BenchmarkRunner::new(args.to_config())?;
    info!(
        "Payload sources: encoded {}, archive {}",
        runner.config().encoded_base_url,
        runner.config().archive_base_url
    );

    match args.benchmark_kind() {
        BenchmarkKindCommand::Compare(compare) => {
            let size = compare.record_count();
            match runner.run_single(size).await {
                Ok(comparison) if args.json => {
                    println!("{}", serde_json::to_string_pretty(&comparison)?)
                }
                Ok(comparison) => comparison.print_summary(),
                Err(e) => warn!("No comparison for {size} records: {e}"),
            }
        }
        BenchmarkKindCommand::Benchmark(_) => {
            let cancellation = CancellationToken::new();
            let ctrl_c_token = cancellation.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        warn!("Received Ctrl-C, stopping the benchmark...");
                        ctrl_c_token.cancel();
                    }
                    Err(e) => error!("Cannot listen for Ctrl-C: {e}"),
                }
            });

            let summary = runner.run(&cancellation).await;
            if args.json {
                println!("{}", summary.to_json()?);
            } else {
                summary.comparisons.iter().for_each(|c| c.print_summary());
                summary.print_summary();
            }
        }
    }

    Ok(())
}
