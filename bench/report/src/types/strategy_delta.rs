use crate::transfer_result::TransferResult;
use crate::utils::round_float;
use serde::{Deserialize, Serialize};

/// Difference between one negotiated leg and the archive leg.
///
/// Positive `size_difference` means the archive was smaller on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDelta {
    pub label: String,
    pub size_difference: i64,
    #[serde(serialize_with = "round_float")]
    pub percentage_difference: f64,
    pub time_difference_ms: i64,
}

impl StrategyDelta {
    pub fn between(encoded: &TransferResult, archive: &TransferResult) -> Self {
        let size_difference = encoded.transfer_size as i64 - archive.transfer_size as i64;
        let percentage_difference = if encoded.transfer_size == 0 {
            f64::NAN
        } else {
            size_difference as f64 / encoded.transfer_size as f64 * 100.0
        };

        StrategyDelta {
            label: encoded.label.clone(),
            size_difference,
            percentage_difference,
            time_difference_ms: encoded.duration_ms as i64 - archive.duration_ms as i64,
        }
    }

    pub fn archive_is_smaller(&self) -> bool {
        self.size_difference > 0
    }
}
