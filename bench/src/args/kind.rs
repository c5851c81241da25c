use super::defaults::*;
use crate::utils::record_count::parse_record_count;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BenchmarkKindCommand {
    #[command(
        about = "Compare both strategies for a single record count",
        visible_alias = "c",
        verbatim_doc_comment
    )]
    Compare(CompareArgs),

    #[command(
        about = "Compare both strategies over a list of record counts",
        long_about = "Runs one comparison per record count, in order, pausing between consecutive sizes",
        visible_alias = "b",
        verbatim_doc_comment
    )]
    Benchmark(SweepArgs),
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CompareArgs {
    /// Number of records to request, non-numeric input falls back to 1000
    #[arg(default_value_t = DEFAULT_RECORD_COUNT.to_string(), allow_negative_numbers = true)]
    pub size: String,
}

impl CompareArgs {
    pub fn record_count(&self) -> u64 {
        parse_record_count(&self.size)
    }
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_RECORD_COUNT.to_string(),
        }
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SweepArgs {
    /// Comma separated record counts, compared in the given order
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    pub sizes: Vec<u64>,

    /// Pause between two consecutive sizes
    #[arg(long, default_value = DEFAULT_COOLDOWN, value_parser = humantime::parse_duration)]
    pub cooldown: Duration,
}
