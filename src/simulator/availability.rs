/// Pre-flight availability check.
use crate::error::AppError;
use crate::http::client::ExecutionClient;

/// Outcome of a successful availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub target: String,
    /// Number of runtime descriptors the target advertised
    pub runtimes: usize,
}

/// Confirm the target answers its runtime listing before any load is sent.
///
/// Any failure here is fatal for the run.
pub async fn check_availability<C: ExecutionClient + ?Sized>(
    client: &C,
) -> Result<AvailabilityReport, AppError> {
    match client.list_runtimes().await {
        Ok(runtimes) => {
            tracing::info!(
                target_url = client.target(),
                runtimes = runtimes.len(),
                "target online"
            );
            Ok(AvailabilityReport {
                target: client.target().to_string(),
                runtimes: runtimes.len(),
            })
        }
        Err(e) => {
            // `main` reports the cause; keep the default log level quiet.
            tracing::debug!(target_url = client.target(), error = %e, "target unavailable");
            Err(e)
        }
    }
}
