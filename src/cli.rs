use crate::error::AppError;
use crate::http::client::{ClientConfig, ExecutionClient, DEFAULT_BASE_URL};
use crate::http::piston::PistonClient;
use crate::output::{Formatter, JsonFormatter, TextFormatter};
use crate::runner::Runner;
use crate::simulator::config::RunConfig;
/// CLI argument parsing and command execution.
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// piston-loadtest - Escalating load waves against a code execution API.
#[derive(Parser, Debug)]
#[command(name = "piston-loadtest")]
#[command(about = "Fire escalating waves of code execution requests and report latency")]
#[command(
    long_about = r#"piston-loadtest - Load test a Piston-style code execution API

Checks that the target lists its runtimes, then runs three waves back to back:
  10 concurrent / 50 total
  25 concurrent / 100 total
  50 concurrent / 200 total
with a pause between waves. Each request posts one of three small programs
(python, javascript, cpp) to /api/v2/execute. Only HTTP 200 counts as success.

EXAMPLES:
  # Default target and schedule
  piston-loadtest

  # Local instance, JSON summaries
  piston-loadtest --target http://localhost:2000 --format json"#
)]
#[command(version)]
pub struct Cli {
    /// Base URL of the code execution API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub target: String,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Seconds to wait between waves
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub pause: u64,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON documents, one per availability check, progress checkpoint and wave
    Json,
}

impl Cli {
    /// Execute the load test.
    pub fn run(self) -> Result<(), AppError> {
        init_tracing(self.verbose);

        let client_config = self.client_config();
        let config = self.run_config();
        let client = Arc::new(PistonClient::new(client_config)?);
        let formatter: Box<dyn Formatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter),
            OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        };

        tracing::info!(
            target_url = client.target(),
            waves = config.waves.len(),
            "starting load test"
        );

        let rt = tokio::runtime::Runtime::new()?;
        let runner = Runner::new(client, config, formatter);
        rt.block_on(runner.run())?;

        Ok(())
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.target.clone())
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            pause: Duration::from_secs(self.pause),
            ..RunConfig::default()
        }
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Diagnostics go to stderr so stdout carries only the report.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::new(format!("piston_loadtest={}", log_level(verbose)));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
