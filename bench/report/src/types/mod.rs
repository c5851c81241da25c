pub mod benchmark_summary;
pub mod comparison_result;
pub mod encoding_variant;
pub mod strategy_delta;
pub mod transfer_result;
