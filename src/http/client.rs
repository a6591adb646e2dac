/// HTTP client abstraction for code-execution APIs.
use crate::error::AppError;
use crate::payloads::Payload;
use std::time::Duration;

/// Default target: the Piston deployment the harness was written against.
pub const DEFAULT_BASE_URL: &str = "http://34.134.219.255:2000";

/// Path of the runtime listing used by the availability check.
pub const RUNTIMES_PATH: &str = "/api/v2/runtimes";

/// Path of the code execution endpoint.
pub const EXECUTE_PATH: &str = "/api/v2/execute";

/// Trait for code-execution API clients.
#[async_trait::async_trait]
pub trait ExecutionClient: Send + Sync {
    /// Fetch the runtime descriptors advertised by the target.
    ///
    /// Any transport error, non-200 status, or non-array body is an error.
    async fn list_runtimes(&self) -> Result<Vec<serde_json::Value>, AppError>;

    /// Submit one payload for execution and return the HTTP status code.
    ///
    /// Every response that arrives is `Ok`, whatever its status; only
    /// transport-level faults (timeout, connect, DNS) are `Err`.
    async fn execute(&self, payload: &Payload) -> Result<u16, AppError>;

    /// Base URL the client talks to.
    fn target(&self) -> &str;
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://host:2000`
    pub base_url: String,
    /// Bound on each execute request
    pub request_timeout: Duration,
    /// Bound on the availability check
    pub availability_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Join `path` onto the base URL without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            availability_timeout: Duration::from_secs(5),
        }
    }
}
