use super::defaults::*;
use super::kind::{BenchmarkKindCommand, CompareArgs};
use crate::config::BenchConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct TransferBenchArgs {
    /// Benchmark kind, a single comparison when omitted
    #[command(subcommand)]
    pub benchmark_kind: Option<BenchmarkKindCommand>,

    /// Number of records for a single comparison when no subcommand is given
    #[arg(allow_negative_numbers = true)]
    pub size: Option<String>,

    /// Base URL of the payload source negotiating Content-Encoding
    #[arg(long, global = true, default_value_t = DEFAULT_ENCODED_BASE_URL.to_owned())]
    pub encoded_url: String,

    /// Base URL of the payload source serving zipped attachments
    #[arg(long, global = true, default_value_t = DEFAULT_ARCHIVE_BASE_URL.to_owned())]
    pub archive_url: String,

    /// Per-request timeout, 0 waits forever
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    /// Print results as JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

impl TransferBenchArgs {
    pub fn benchmark_kind(&self) -> BenchmarkKindCommand {
        match (&self.benchmark_kind, &self.size) {
            (Some(kind), _) => kind.clone(),
            (None, Some(size)) => BenchmarkKindCommand::Compare(CompareArgs { size: size.clone() }),
            (None, None) => BenchmarkKindCommand::Compare(CompareArgs::default()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    pub fn to_config(&self) -> BenchConfig {
        let mut config = BenchConfig {
            encoded_base_url: self.encoded_url.clone(),
            archive_base_url: self.archive_url.clone(),
            request_timeout: self.request_timeout(),
            ..Default::default()
        };
        if let BenchmarkKindCommand::Benchmark(sweep) = self.benchmark_kind() {
            config.sizes = sweep.sizes;
            config.cooldown = sweep.cooldown;
        }
        config
    }
}
