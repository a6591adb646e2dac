/// JSON formatter for scripting.
use crate::error::AppError;
use crate::output::{Formatter, WaveSummary};
use crate::simulator::config::WaveConfig;
use crate::simulator::availability::AvailabilityReport;
use serde_json::json;

/// One JSON document per event: availability, progress checkpoint, finished wave.
/// Every line of stdout in this mode belongs to a JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &serde_json::Value) -> Result<String, AppError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}

impl Formatter for JsonFormatter {
    fn format_availability(&self, report: &AvailabilityReport) -> Result<String, AppError> {
        self.render(&json!({
            "event": "availability",
            "status": "online",
            "target": report.target,
            "runtimes": report.runtimes,
        }))
    }

    fn format_offline(&self, target: &str, error: &AppError) -> Result<String, AppError> {
        self.render(&json!({
            "event": "availability",
            "status": "offline",
            "target": target,
            "error": error.to_string(),
        }))
    }

    fn format_wave_header(&self, _wave: &WaveConfig) -> Option<String> {
        None
    }

    fn format_progress(&self, completed: usize, total: usize) -> Result<String, AppError> {
        self.render(&json!({
            "event": "progress",
            "completed": completed,
            "total": total,
        }))
    }

    fn format_summary(
        &self,
        wave: &WaveConfig,
        summary: &WaveSummary,
    ) -> Result<String, AppError> {
        self.render(&json!({
            "event": "wave",
            "concurrency": wave.concurrency,
            "total_requests": wave.total_requests,
            "summary": summary,
        }))
    }
}
