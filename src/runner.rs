/// Top-level sequencing: availability check, then each wave with a pause in between.
use crate::error::AppError;
use crate::http::client::ExecutionClient;
use crate::output::{Formatter, WaveSummary};
use crate::simulator::config::{RunConfig, WaveConfig};
use crate::simulator::availability::{check_availability, AvailabilityReport};
use crate::simulator::simulator::Simulator;
use std::sync::Arc;
use tokio::time::{sleep, Instant};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub availability: AvailabilityReport,
    pub waves: Vec<(WaveConfig, WaveSummary)>,
}

/// Receives every rendered line of the report.
pub type OutputSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Drives one full run against a single client.
pub struct Runner<C: ExecutionClient + 'static> {
    client: Arc<C>,
    config: RunConfig,
    simulator: Simulator,
    formatter: Arc<dyn Formatter>,
    output: OutputSink,
}

impl<C: ExecutionClient + 'static> Runner<C> {
    /// Create a runner that writes its report to stdout.
    pub fn new(client: Arc<C>, config: RunConfig, formatter: Box<dyn Formatter>) -> Self {
        let formatter: Arc<dyn Formatter> = Arc::from(formatter);
        let output: OutputSink = Arc::new(|line: &str| println!("{}", line));
        let simulator = Self::simulator_for(&config, &formatter, &output);
        Self {
            client,
            config,
            simulator,
            formatter,
            output,
        }
    }

    /// Send the report somewhere other than stdout.
    pub fn with_output(mut self, output: OutputSink) -> Self {
        self.simulator = Self::simulator_for(&self.config, &self.formatter, &output);
        self.output = output;
        self
    }

    /// Progress checkpoints are rendered by the same formatter as the rest
    /// of the report, so a JSON run never interleaves plain text.
    fn simulator_for(
        config: &RunConfig,
        formatter: &Arc<dyn Formatter>,
        output: &OutputSink,
    ) -> Simulator {
        let formatter = formatter.clone();
        let output = output.clone();
        Simulator::new(config.progress_every).with_progress(Arc::new(move |completed, total| {
            match formatter.format_progress(completed, total) {
                Ok(line) => output(&line),
                Err(e) => tracing::warn!(error = %e, "failed to render progress"),
            }
        }))
    }

    /// Run the availability check and every wave in order.
    ///
    /// A failed availability check stops the run before any execute request is sent.
    /// Waves never overlap.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        self.config.validate()?;

        let availability_report = match check_availability(self.client.as_ref()).await {
            Ok(report) => report,
            Err(e) => {
                (self.output)(&self.formatter.format_offline(self.client.target(), &e)?);
                return Err(e);
            }
        };
        (self.output)(&self.formatter.format_availability(&availability_report)?);

        let mut waves = Vec::with_capacity(self.config.waves.len());
        for (index, wave) in self.config.waves.iter().copied().enumerate() {
            if index > 0 && !self.config.pause.is_zero() {
                tracing::info!(
                    pause_secs = self.config.pause.as_secs_f64(),
                    "pausing between waves"
                );
                sleep(self.config.pause).await;
            }

            let summary = self.run_wave(wave).await?;
            waves.push((wave, summary));
        }

        Ok(RunReport {
            availability: availability_report,
            waves,
        })
    }

    async fn run_wave(&self, wave: WaveConfig) -> Result<WaveSummary, AppError> {
        if let Some(header) = self.formatter.format_wave_header(&wave) {
            (self.output)(&header);
        }
        tracing::info!(
            concurrency = wave.concurrency,
            total = wave.total_requests,
            "wave starting"
        );

        let started = Instant::now();
        let results = self
            .simulator
            .run_wave(self.client.clone(), &self.config.payloads, wave)
            .await;
        let summary = WaveSummary::from_results(&results).with_duration(started.elapsed());

        tracing::info!(
            successful = summary.successful,
            failed = summary.failed,
            "wave finished"
        );
        if let Some(error) = WaveSummary::first_error(&results) {
            tracing::warn!(failed = summary.failed, first_error = %error, "wave had failures");
        }

        (self.output)(&self.formatter.format_summary(&wave, &summary)?);
        Ok(summary)
    }
}
