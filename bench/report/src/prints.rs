use crate::{
    benchmark_summary::{BenchmarkSummary, SummaryRow},
    comparison_result::ComparisonResult,
    encoding_variant::EncodingVariant,
    transfer_result::TransferResult,
};
use colored::{Color, ColoredString, Colorize};
use comfy_table::Table;
use human_repr::HumanCount;
use tracing::info;

impl TransferResult {
    pub fn formatted_string(&self) -> String {
        let mut lines = vec![
            format!("{}:", self.label),
            format!(
                "  Transfer Size: {} bytes ({})",
                self.transfer_size,
                self.transfer_size.human_count_bytes()
            ),
        ];
        if let Some(uncompressed_size) = self.uncompressed_size {
            lines.push(format!(
                "  Uncompressed Size: {} bytes ({})",
                uncompressed_size,
                uncompressed_size.human_count_bytes()
            ));
        }
        if let Some(ratio) = self.compression_ratio() {
            lines.push(format!("  Compression Ratio: {}", format_percentage(ratio * 100.0)));
        }
        lines.push(format!("  Duration: {}ms", self.duration_ms));
        lines.push(format!(
            "  Content-Encoding: {}",
            self.content_encoding_or_none()
        ));
        lines.push(format!(
            "  Content-Type: {}",
            self.content_type.as_deref().unwrap_or("unknown")
        ));

        lines.join("\n")
    }
}

impl ComparisonResult {
    pub fn print_summary(&self) {
        println!();
        info!(
            "{}",
            format!("=== Transfer sizes for {} records ===", self.size).blue()
        );
        self.encoded_results
            .iter()
            .for_each(|r| info!("{}\n", r.formatted_string().green()));
        info!("{}\n", self.archive_result.formatted_string().yellow());
        info!("{}", self.formatted_comparison());
    }

    pub fn formatted_comparison(&self) -> ColoredString {
        let best_encoded = self.best_encoded();
        let mut lines = vec![
            "--- Comparison ---".to_owned(),
            format!(
                "Smallest HTTP compression: {} ({} bytes) vs {} ({} bytes)",
                best_encoded.label,
                best_encoded.transfer_size,
                self.archive_result.label,
                self.archive_result.transfer_size
            ),
        ];
        for delta in &self.deltas {
            let smaller = if delta.archive_is_smaller() {
                &self.archive_result.label
            } else {
                &delta.label
            };
            lines.push(format!(
                "{} vs {}: size difference {} bytes ({}), time difference {}ms, {} is {} smaller",
                delta.label,
                self.archive_result.label,
                delta.size_difference,
                format_percentage(delta.percentage_difference),
                delta.time_difference_ms,
                smaller,
                format_percentage(delta.percentage_difference.abs()),
            ));
        }

        let color = if self.best_is_archive() {
            Color::Yellow
        } else {
            Color::Green
        };
        lines.push(format!(
            "Best: {} ({} bytes)",
            self.best.label, self.best.transfer_size
        ));

        lines.join("\n").color(color)
    }
}

impl BenchmarkSummary {
    pub fn print_summary(&self) {
        println!();
        info!("{}", "=== Benchmark Summary ===".blue());
        if self.is_empty() {
            info!("No comparisons were completed.");
            return;
        }
        info!("\n{}", self.summary_table());
        if self.cancelled {
            info!("{}", "Benchmark was cancelled before all sizes were run.".red());
        }
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec!["Size".to_owned()];
        header.extend(
            EncodingVariant::ENCODED
                .iter()
                .map(|variant| format!("HTTP ({variant})")),
        );
        header.push("Manual ZIP".to_owned());
        header.push("Best".to_owned());
        table.set_header(header);

        for summary_row in self.rows() {
            let mut row = vec![summary_row.size().to_string()];
            match summary_row {
                SummaryRow::Compared(comparison) => {
                    row.extend(EncodingVariant::ENCODED.iter().map(|variant| {
                        comparison
                            .encoded_results
                            .iter()
                            .find(|r| r.encoding_variant == *variant)
                            .map(|r| r.transfer_size.to_string())
                            .unwrap_or_else(|| "-".to_owned())
                    }));
                    row.push(comparison.archive_result.transfer_size.to_string());
                    row.push(comparison.best.label.clone());
                }
                SummaryRow::Skipped(skipped) => {
                    row.extend(EncodingVariant::ENCODED.iter().map(|_| "-".to_owned()));
                    row.push("-".to_owned());
                    row.push(format!("skipped: {}", skipped.reason));
                }
            }
            table.add_row(row);
        }

        table
    }
}

fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}
