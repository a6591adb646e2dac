/// Wave statistics: success rate and latency distribution.
use crate::simulator::simulator::RequestResult;
use serde::Serialize;
use std::time::Duration;

/// Latency distribution over successful requests, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencyStats {
    /// Compute the distribution; `None` when there are no samples.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = sorted.len();

        let mid = n / 2;
        let median = if n % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
            p95: sorted[percentile_index(n, 0.95)],
            p99: sorted[percentile_index(n, 0.99)],
        })
    }
}

/// Index of the `p` percentile in an ascending sample of length `n`:
/// `floor(n * p)`, clamped to the last element. `n` must be non-zero.
pub fn percentile_index(n: usize, p: f64) -> usize {
    let index = ((n as f64) * p).floor() as usize;
    index.min(n.saturating_sub(1))
}

/// Aggregate view of one wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage of successful requests, 0-100
    pub success_rate: f64,
    /// Omitted entirely when nothing succeeded
    pub latency: Option<LatencyStats>,
    /// Wall-clock duration of the wave in seconds, when measured
    pub duration_secs: Option<f64>,
    pub throughput_rps: Option<f64>,
}

impl WaveSummary {
    pub fn from_results(results: &[RequestResult]) -> Self {
        let total = results.len();
        let latencies: Vec<f64> = results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.elapsed.as_secs_f64())
            .collect();
        let successful = latencies.len();

        let success_rate = if total > 0 {
            (successful as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total,
            successful,
            failed: total - successful,
            success_rate,
            latency: LatencyStats::from_samples(&latencies),
            duration_secs: None,
            throughput_rps: None,
        }
    }

    /// Attach the wave's wall-clock duration and derived throughput.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        self.duration_secs = Some(secs);
        self.throughput_rps = if secs > 0.0 {
            Some(self.total as f64 / secs)
        } else {
            None
        };
        self
    }

    /// First transport or status failure, for a hint in the report.
    pub fn first_error(results: &[RequestResult]) -> Option<String> {
        results.iter().find(|r| !r.success).map(|r| match (&r.error, r.status_code) {
            (Some(error), _) => error.clone(),
            (None, Some(status)) => format!("HTTP status {}", status),
            (None, None) => "unknown failure".to_string(),
        })
    }
}
