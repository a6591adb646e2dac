/// Wave and run configuration for the load test.
use crate::error::AppError;
use crate::payloads::PayloadSet;
use std::time::Duration;

/// Completions between progress lines.
pub const DEFAULT_PROGRESS_EVERY: usize = 50;

/// One burst of `total_requests` requests at `concurrency` workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveConfig {
    pub concurrency: usize,
    pub total_requests: usize,
}

impl WaveConfig {
    /// Create a wave; both values must be at least 1.
    pub fn new(concurrency: usize, total_requests: usize) -> Result<Self, AppError> {
        if concurrency == 0 {
            return Err(AppError::Config(
                "Wave concurrency must be at least 1".to_string(),
            ));
        }
        if total_requests == 0 {
            return Err(AppError::Config(
                "Wave total requests must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            concurrency,
            total_requests,
        })
    }

    /// The escalating 10/50, 25/100, 50/200 schedule.
    pub fn default_schedule() -> Vec<WaveConfig> {
        vec![
            WaveConfig {
                concurrency: 10,
                total_requests: 50,
            },
            WaveConfig {
                concurrency: 25,
                total_requests: 100,
            },
            WaveConfig {
                concurrency: 50,
                total_requests: 200,
            },
        ]
    }
}

/// Schedule and payloads for a run, passed explicitly into the runner.
///
/// Transport settings live in `ClientConfig` on the client itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub payloads: PayloadSet,
    pub waves: Vec<WaveConfig>,
    /// Pause between consecutive waves; not applied after the last one.
    pub pause: Duration,
    pub progress_every: usize,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.waves.is_empty() {
            return Err(AppError::Config("At least one wave is required".to_string()));
        }
        for wave in &self.waves {
            WaveConfig::new(wave.concurrency, wave.total_requests)?;
        }
        if self.progress_every == 0 {
            return Err(AppError::Config(
                "Progress interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            payloads: PayloadSet::default(),
            waves: WaveConfig::default_schedule(),
            pause: Duration::from_secs(5),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}
