use crate::comparison_result::ComparisonResult;
use serde::{Deserialize, Serialize};

/// A record count whose comparison produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSize {
    pub size: u64,
    pub reason: String,
    /// Place of this size in the sweep, counting compared and skipped sizes
    pub position: usize,
}

/// One line of a sweep, either a finished comparison or a skipped size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryRow<'a> {
    Compared(&'a ComparisonResult),
    Skipped(&'a SkippedSize),
}

impl SummaryRow<'_> {
    pub fn size(&self) -> u64 {
        match self {
            SummaryRow::Compared(comparison) => comparison.size,
            SummaryRow::Skipped(skipped) => skipped.size,
        }
    }
}

/// Per-size comparisons of one sweep, in the order the sizes were requested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub comparisons: Vec<ComparisonResult>,
    pub skipped: Vec<SkippedSize>,
    /// Set when the sweep was stopped before the last size
    pub cancelled: bool,
}

impl BenchmarkSummary {
    pub fn push(&mut self, comparison: ComparisonResult) {
        self.comparisons.push(comparison);
    }

    pub fn skip(&mut self, size: u64, reason: impl Into<String>) {
        let position = self.len();
        self.skipped.push(SkippedSize {
            size,
            reason: reason.into(),
            position,
        });
    }

    pub fn len(&self) -> usize {
        self.comparisons.len() + self.skipped.len()
    }

    /// Compared and skipped sizes merged back into the order they were recorded.
    pub fn rows(&self) -> Vec<SummaryRow<'_>> {
        let mut comparisons = self.comparisons.iter();
        let mut skipped = self.skipped.iter().peekable();
        (0..self.len())
            .filter_map(|position| {
                if let Some(skipped) = skipped.next_if(|s| s.position == position) {
                    return Some(SummaryRow::Skipped(skipped));
                }
                comparisons
                    .next()
                    .map(SummaryRow::Compared)
                    .or_else(|| skipped.next().map(SummaryRow::Skipped))
            })
            .collect()
    }

    pub fn sizes(&self) -> Vec<u64> {
        self.comparisons.iter().map(|c| c.size).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty() && self.skipped.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
