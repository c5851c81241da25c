use crate::comparator::Comparator;
use crate::config::BenchConfig;
use crate::error::{BenchError, ComparisonError};
use crate::measurer::TransferMeasurer;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use transfer_bench_report::benchmark_summary::BenchmarkSummary;
use transfer_bench_report::comparison_result::ComparisonResult;

pub struct BenchmarkRunner {
    config: BenchConfig,
    comparator: Comparator,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        let measurer = TransferMeasurer::new(&config)?;
        let comparator = Comparator::from_config(measurer, &config);
        Ok(Self { config, comparator })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub async fn run_single(&self, size: u64) -> Result<ComparisonResult, ComparisonError> {
        self.comparator.compare(size).await
    }

    /// Sweeps the configured sizes with the configured cooldown.
    pub async fn run(&self, cancellation: &CancellationToken) -> BenchmarkSummary {
        self.run_benchmark(&self.config.sizes, self.config.cooldown, cancellation)
            .await
    }

    /// Compares every size in order, pausing `cooldown` between two sizes.
    ///
    /// A size whose comparison fails is recorded as skipped and the sweep goes
    /// on. Cancelling the token stops the sweep at the next suspension point and
    /// returns what was collected so far.
    pub async fn run_benchmark(
        &self,
        sizes: &[u64],
        cooldown: Duration,
        cancellation: &CancellationToken,
    ) -> BenchmarkSummary {
        info!(
            "Starting benchmark for {} sizes with {} ms cooldown...",
            sizes.len(),
            cooldown.as_millis()
        );
        let mut summary = BenchmarkSummary::default();

        for (index, &size) in sizes.iter().enumerate() {
            if index > 0 && !cooldown.is_zero() {
                tokio::select! {
                    _ = cancellation.cancelled() => {
                        summary.cancelled = true;
                        break;
                    }
                    _ = sleep(cooldown) => {}
                }
            }
            if cancellation.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            tokio::select! {
                _ = cancellation.cancelled() => {
                    warn!("Benchmark cancelled while comparing {size} records.");
                    summary.cancelled = true;
                    break;
                }
                result = self.comparator.compare(size) => {
                    match result {
                        Ok(comparison) => summary.push(comparison),
                        Err(e) => {
                            warn!("Skipping {size} records: {e}");
                            summary.skip(size, e.to_string());
                        }
                    }
                }
            }
        }

        info!(
            "Benchmark finished: {} compared, {} skipped.",
            summary.comparisons.len(),
            summary.skipped.len()
        );
        summary
    }
}
