/// Plain text formatter.
use crate::error::AppError;
use crate::output::{Formatter, WaveSummary};
use crate::simulator::config::WaveConfig;
use crate::simulator::availability::AvailabilityReport;

/// Human-readable text output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_availability(&self, report: &AvailabilityReport) -> Result<String, AppError> {
        Ok(format!(
            "API Status: ✓ Online\nAvailable runtimes: {}",
            report.runtimes
        ))
    }

    fn format_offline(&self, _target: &str, _error: &AppError) -> Result<String, AppError> {
        Ok("API Status: ✗ Offline".to_string())
    }

    fn format_wave_header(&self, wave: &WaveConfig) -> Option<String> {
        Some(format!(
            "\n=== Load Test: {} concurrent, {} total ===\n",
            wave.concurrency, wave.total_requests
        ))
    }

    fn format_progress(&self, completed: usize, total: usize) -> Result<String, AppError> {
        Ok(format!("Completed: {}/{}", completed, total))
    }

    fn format_summary(
        &self,
        _wave: &WaveConfig,
        summary: &WaveSummary,
    ) -> Result<String, AppError> {
        let mut output = Vec::new();

        output.push("\n=== Results ===".to_string());
        output.push(format!("Total requests: {}", summary.total));
        output.push(format!(
            "Successful: {} ({:.1}%)",
            summary.successful, summary.success_rate
        ));
        output.push(format!("Failed: {}", summary.failed));

        if let Some(duration) = summary.duration_secs {
            output.push(format!("Wave duration: {:.3}s", duration));
        }
        if let Some(throughput) = summary.throughput_rps {
            output.push(format!("Throughput: {:.1} req/s", throughput));
        }

        if let Some(latency) = &summary.latency {
            output.push(String::new());
            output.push("Response times:".to_string());
            output.push(format!("  Min: {:.3}s", latency.min));
            output.push(format!("  Max: {:.3}s", latency.max));
            output.push(format!("  Mean: {:.3}s", latency.mean));
            output.push(format!("  Median: {:.3}s", latency.median));
            output.push(format!("  P95: {:.3}s", latency.p95));
            output.push(format!("  P99: {:.3}s", latency.p99));
        }

        Ok(output.join("\n"))
    }
}
