/// Wave driver and single-request executor.
use crate::http::client::ExecutionClient;
use crate::payloads::{Payload, PayloadSet};
use crate::simulator::config::{WaveConfig, DEFAULT_PROGRESS_EVERY};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Result of a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    /// True only for HTTP 200
    pub success: bool,
    /// Wall-clock time from send to outcome
    pub elapsed: Duration,
    /// Status code when a response arrived
    pub status_code: Option<u16>,
    /// Transport error description when no response arrived
    pub error: Option<String>,
}

impl RequestResult {
    pub fn succeeded(elapsed: Duration) -> Self {
        Self {
            success: true,
            elapsed,
            status_code: Some(200),
            error: None,
        }
    }

    pub fn rejected(elapsed: Duration, status_code: u16) -> Self {
        Self {
            success: false,
            elapsed,
            status_code: Some(status_code),
            error: None,
        }
    }

    pub fn errored(elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            status_code: None,
            error: Some(error.into()),
        }
    }
}

/// Called with `(completed, total)` at every progress checkpoint.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Load testing simulator.
pub struct Simulator {
    progress_every: usize,
    progress: ProgressFn,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_EVERY)
    }
}

impl Simulator {
    /// Create a simulator that prints `Completed: k/N` every `progress_every`
    /// completions.
    pub fn new(progress_every: usize) -> Self {
        Self {
            progress_every: progress_every.max(1),
            progress: Arc::new(|completed, total| {
                println!("Completed: {}/{}", completed, total);
            }),
        }
    }

    /// Replace the progress sink.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = progress;
        self
    }

    /// Run one wave and return its results in completion order.
    ///
    /// Request `i` carries `payloads.select(i)`. All requests are spawned up
    /// front; each waits for a permit so at most `wave.concurrency` are in
    /// flight. The join set is drained before returning, and dropping it on
    /// any other exit aborts whatever is left.
    pub async fn run_wave<C: ExecutionClient + 'static>(
        &self,
        client: Arc<C>,
        payloads: &PayloadSet,
        wave: WaveConfig,
    ) -> Vec<RequestResult> {
        let total = wave.total_requests;
        let semaphore = Arc::new(Semaphore::new(wave.concurrency.max(1)));
        let mut workers = JoinSet::new();

        for i in 0..total {
            let client = client.clone();
            let semaphore = semaphore.clone();
            let payload = payloads.select(i).clone();

            workers.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return RequestResult::errored(
                            Duration::ZERO,
                            format!("Failed to acquire worker slot: {}", e),
                        )
                    }
                };
                Self::execute_request(client.as_ref(), &payload).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(error = %e, "worker task did not complete");
                    RequestResult::errored(Duration::ZERO, format!("Task join error: {}", e))
                }
            };
            results.push(result);

            let completed = results.len();
            if completed % self.progress_every == 0 {
                (self.progress)(completed, total);
            }
        }

        results
    }

    /// Execute a single request. Never fails: every outcome becomes a result.
    pub async fn execute_request<C: ExecutionClient + ?Sized>(
        client: &C,
        payload: &Payload,
    ) -> RequestResult {
        let start = Instant::now();
        let outcome = client.execute(payload).await;
        let elapsed = start.elapsed();

        match outcome {
            Ok(200) => RequestResult::succeeded(elapsed),
            Ok(status) => {
                tracing::debug!(status, language = %payload.language, "execute rejected");
                RequestResult::rejected(elapsed, status)
            }
            Err(e) => {
                tracing::debug!(error = %e, language = %payload.language, "execute failed");
                RequestResult::errored(elapsed, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Sleeps `latency` per call; every `fail_every`-th call (1-based) times out.
    struct MockClient {
        latency: Duration,
        fail_every: Option<usize>,
        status: u16,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
        languages: Mutex<HashMap<String, usize>>,
    }

    impl MockClient {
        fn new(latency: Duration) -> Self {
            Self {
                latency,
                fail_every: None,
                status: 200,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
                languages: Mutex::new(HashMap::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn peak(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }

        fn language_count(&self, language: &str) -> usize {
            let guard = self.languages.lock().expect("languages mutex poisoned");
            guard.get(language).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl ExecutionClient for MockClient {
        async fn list_runtimes(&self) -> Result<Vec<serde_json::Value>, AppError> {
            Ok(Vec::new())
        }

        async fn execute(&self, payload: &Payload) -> Result<u16, AppError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            {
                let mut guard = self.languages.lock().expect("languages mutex poisoned");
                *guard.entry(payload.language.clone()).or_insert(0) += 1;
            }

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.fail_every {
                Some(n) if call % n == 0 => {
                    Err(AppError::Http("Request timed out: deadline elapsed".into()))
                }
                _ => Ok(self.status),
            }
        }

        fn target(&self) -> &str {
            "mock"
        }
    }

    struct PanickingClient;

    #[async_trait]
    impl ExecutionClient for PanickingClient {
        async fn list_runtimes(&self) -> Result<Vec<serde_json::Value>, AppError> {
            Ok(Vec::new())
        }

        async fn execute(&self, payload: &Payload) -> Result<u16, AppError> {
            if payload.language == "cpp" {
                panic!("simulated worker crash");
            }
            Ok(200)
        }

        fn target(&self) -> &str {
            "panicking"
        }
    }

    fn silent() -> Simulator {
        Simulator::new(50).with_progress(Arc::new(|_, _| {}))
    }

    #[tokio::test]
    async fn wave_returns_one_result_per_request() {
        let client = Arc::new(MockClient::new(Duration::from_millis(1)));
        let wave = WaveConfig::new(3, 17).expect("valid wave");

        let results = silent()
            .run_wave(client.clone(), &PayloadSet::default(), wave)
            .await;

        assert_eq!(results.len(), 17);
        assert_eq!(client.calls(), 17);
        assert!(results.iter().all(|r| r.success));
        assert!(results.iter().all(|r| r.status_code == Some(200)));
    }

    #[tokio::test]
    async fn wave_never_exceeds_concurrency() {
        let client = Arc::new(MockClient::new(Duration::from_millis(20)));
        let wave = WaveConfig::new(4, 24).expect("valid wave");

        let results = silent()
            .run_wave(client.clone(), &PayloadSet::default(), wave)
            .await;

        assert_eq!(results.len(), 24);
        assert!(client.peak() <= 4, "peak in-flight was {}", client.peak());
        assert!(client.peak() > 1, "requests should overlap");
    }

    #[tokio::test]
    async fn wave_uses_payloads_round_robin() {
        let client = Arc::new(MockClient::new(Duration::ZERO));
        let wave = WaveConfig::new(2, 7).expect("valid wave");

        silent()
            .run_wave(client.clone(), &PayloadSet::default(), wave)
            .await;

        assert_eq!(client.language_count("python"), 3);
        assert_eq!(client.language_count("javascript"), 2);
        assert_eq!(client.language_count("cpp"), 2);
    }

    #[tokio::test]
    async fn timeouts_are_recorded_not_raised() {
        let mut mock = MockClient::new(Duration::from_millis(1));
        mock.fail_every = Some(3);
        let client = Arc::new(mock);
        let wave = WaveConfig::new(5, 30).expect("valid wave");

        let results = silent()
            .run_wave(client, &PayloadSet::default(), wave)
            .await;

        let failures: Vec<&RequestResult> = results.iter().filter(|r| !r.success).collect();
        let successes = results.iter().filter(|r| r.success).count();

        assert_eq!(failures.len(), 10);
        assert_eq!(successes + failures.len(), 30);
        for failure in failures {
            assert!(failure.status_code.is_none());
            let error = failure.error.as_deref().unwrap_or_default();
            assert!(!error.is_empty());
            assert!(error.contains("timed out"), "unexpected error: {}", error);
        }
    }

    #[tokio::test]
    async fn non_200_status_is_a_failure_with_code() {
        let mut mock = MockClient::new(Duration::ZERO);
        mock.status = 500;
        let client = Arc::new(mock);

        let results = silent()
            .run_wave(client, &PayloadSet::default(), WaveConfig::new(2, 4).expect("valid wave"))
            .await;

        assert_eq!(results.len(), 4);
        for result in results {
            assert!(!result.success);
            assert_eq!(result.status_code, Some(500));
            assert!(result.error.is_none());
        }
    }

    #[tokio::test]
    async fn panicking_worker_becomes_failed_result() {
        let results = silent()
            .run_wave(
                Arc::new(PanickingClient),
                &PayloadSet::default(),
                WaveConfig::new(3, 9).expect("valid wave"),
            )
            .await;

        assert_eq!(results.len(), 9);
        let failed: Vec<&RequestResult> = results.iter().filter(|r| !r.success).collect();
        assert_eq!(failed.len(), 3, "every cpp request panics");
        for result in failed {
            assert!(result.status_code.is_none());
            assert!(result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("Task join error")));
        }
    }

    #[tokio::test]
    async fn progress_fires_every_interval() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = ticks.clone();
        let simulator = Simulator::new(50).with_progress(Arc::new(move |done, total| {
            sink.lock().expect("ticks mutex poisoned").push((done, total));
        }));

        let client = Arc::new(MockClient::new(Duration::ZERO));
        simulator
            .run_wave(client, &PayloadSet::default(), WaveConfig::new(10, 120).expect("valid wave"))
            .await;

        let ticks = ticks.lock().expect("ticks mutex poisoned").clone();
        assert_eq!(ticks, vec![(50, 120), (100, 120)]);
    }

    #[tokio::test]
    async fn execute_request_measures_elapsed() {
        let client = MockClient::new(Duration::from_millis(15));
        let payloads = PayloadSet::default();

        let result = Simulator::execute_request(&client, payloads.select(0)).await;

        assert!(result.success);
        assert!(result.elapsed >= Duration::from_millis(15));
    }
}
