use crate::strategy_delta::StrategyDelta;
use crate::transfer_result::TransferResult;
use serde::{Deserialize, Serialize};

/// Negotiated legs and the archive leg measured for one record count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Number of records requested from both payload sources
    pub size: u64,

    /// Surviving negotiated legs, in the order they were measured
    pub encoded_results: Vec<TransferResult>,

    /// The zipped attachment leg
    pub archive_result: TransferResult,

    /// Leg with the smallest transfer size, earliest leg wins a tie
    pub best: TransferResult,

    /// Every negotiated leg compared against the archive leg
    pub deltas: Vec<StrategyDelta>,
}

impl ComparisonResult {
    /// Returns `None` when there is no negotiated leg to compare against.
    pub fn new(
        size: u64,
        encoded_results: Vec<TransferResult>,
        archive_result: TransferResult,
    ) -> Option<Self> {
        if encoded_results.is_empty() {
            return None;
        }

        // min_by_key keeps the first of equal elements
        let best = encoded_results
            .iter()
            .chain(std::iter::once(&archive_result))
            .min_by_key(|result| result.transfer_size)?
            .clone();

        let deltas = encoded_results
            .iter()
            .map(|encoded| StrategyDelta::between(encoded, &archive_result))
            .collect();

        Some(ComparisonResult {
            size,
            encoded_results,
            archive_result,
            best,
            deltas,
        })
    }

    /// Smallest negotiated leg, earliest leg wins a tie.
    pub fn best_encoded(&self) -> &TransferResult {
        self.encoded_results
            .iter()
            .min_by_key(|result| result.transfer_size)
            .unwrap_or(&self.archive_result)
    }

    pub fn best_is_archive(&self) -> bool {
        !self.best.encoding_variant.is_negotiated()
    }
}
