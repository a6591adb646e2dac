/// Output formatting for availability and wave reports.
pub mod json;
pub mod summary;
pub mod text;

pub use json::JsonFormatter;
pub use summary::{LatencyStats, WaveSummary};
pub use text::TextFormatter;

use crate::error::AppError;
use crate::simulator::config::WaveConfig;
use crate::simulator::availability::AvailabilityReport;

/// Trait for rendering run output.
pub trait Formatter: Send + Sync {
    /// Render the availability check result.
    fn format_availability(&self, report: &AvailabilityReport) -> Result<String, AppError>;

    /// Render a failed availability check. `error` is reported again by `main` on stderr.
    fn format_offline(&self, target: &str, error: &AppError) -> Result<String, AppError>;

    /// Banner printed before a wave starts. `None` suppresses it.
    fn format_wave_header(&self, wave: &WaveConfig) -> Option<String>;

    /// Progress checkpoint inside a wave.
    fn format_progress(&self, completed: usize, total: usize) -> Result<String, AppError>;

    /// Render a finished wave.
    fn format_summary(
        &self,
        wave: &WaveConfig,
        summary: &WaveSummary,
    ) -> Result<String, AppError>;
}
