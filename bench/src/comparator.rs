use crate::config::{data_url, BenchConfig};
use crate::error::{ComparisonError, TransferError};
use crate::measurer::TransferMeasurer;
use tracing::{info, warn};
use transfer_bench_report::comparison_result::ComparisonResult;
use transfer_bench_report::encoding_variant::EncodingVariant;

/// Measures both payload sources for one record count.
#[derive(Debug, Clone)]
pub struct Comparator {
    measurer: TransferMeasurer,
    encoded_base_url: String,
    archive_base_url: String,
}

impl Comparator {
    pub fn new(
        measurer: TransferMeasurer,
        encoded_base_url: impl Into<String>,
        archive_base_url: impl Into<String>,
    ) -> Self {
        Self {
            measurer,
            encoded_base_url: encoded_base_url.into(),
            archive_base_url: archive_base_url.into(),
        }
    }

    pub fn from_config(measurer: TransferMeasurer, config: &BenchConfig) -> Self {
        Self::new(
            measurer,
            config.encoded_base_url.clone(),
            config.archive_base_url.clone(),
        )
    }

    /// Runs the negotiated legs (all, gzip, deflate, brotli) and then the
    /// archive leg, one after another. Failed negotiated legs are dropped; the
    /// comparison fails only when the archive leg or every negotiated leg failed.
    pub async fn compare(&self, size: u64) -> Result<ComparisonResult, ComparisonError> {
        info!("Comparing transfer sizes for {size} records...");

        let encoded_url = data_url(&self.encoded_base_url, size)
            .ok_or_else(|| TransferError::InvalidUrl(self.encoded_base_url.clone()));
        let archive_url = data_url(&self.archive_base_url, size)
            .ok_or_else(|| TransferError::InvalidUrl(self.archive_base_url.clone()));

        let mut encoded_results = Vec::with_capacity(EncodingVariant::ENCODED.len());
        match &encoded_url {
            Ok(url) => {
                for variant in EncodingVariant::ENCODED {
                    if let Ok(result) = self.measurer.measure_encoded(url, variant).await {
                        encoded_results.push(result);
                    }
                }
            }
            Err(e) => warn!("Skipping negotiated legs: {e}"),
        }

        let archive_result = match archive_url {
            Ok(url) => self.measurer.measure_archive(&url).await,
            Err(e) => Err(e),
        }
        .map_err(ComparisonError::ArchiveUnavailable)?;

        if encoded_results.len() < EncodingVariant::ENCODED.len() {
            warn!(
                "Only {} of {} negotiated legs succeeded for {size} records.",
                encoded_results.len(),
                EncodingVariant::ENCODED.len()
            );
        }

        let comparison = ComparisonResult::new(size, encoded_results, archive_result)
            .ok_or(ComparisonError::NoEncodedResults)?;
        info!(
            "Best strategy for {size} records: {} ({} bytes).",
            comparison.best.label, comparison.best.transfer_size
        );
        Ok(comparison)
    }
}
