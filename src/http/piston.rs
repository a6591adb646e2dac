/// Piston `/api/v2` client implementation.
use crate::error::AppError;
use crate::http::client::{ClientConfig, ExecutionClient, EXECUTE_PATH, RUNTIMES_PATH};
use crate::payloads::Payload;
use reqwest::{Client, StatusCode};

/// Client for a Piston-compatible code execution service.
///
/// One instance is shared by every worker in a wave, so requests reuse the
/// same connection pool.
pub struct PistonClient {
    client: Client,
    config: ClientConfig,
}

impl PistonClient {
    /// Create a new Piston client.
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::Config(
                "Target base URL cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

/// Render a transport error so the failure kind is visible in reports.
fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

#[async_trait::async_trait]
impl ExecutionClient for PistonClient {
    async fn list_runtimes(&self) -> Result<Vec<serde_json::Value>, AppError> {
        let response = self
            .client
            .get(self.config.url(RUNTIMES_PATH))
            .timeout(self.config.availability_timeout)
            .send()
            .await
            .map_err(|e| AppError::Http(describe(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Api(format!(
                "Runtime listing returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| {
                AppError::Api(format!("Runtime listing is not a JSON array: {}", e))
            })
    }

    async fn execute(&self, payload: &Payload) -> Result<u16, AppError> {
        let response = self
            .client
            .post(self.config.url(EXECUTE_PATH))
            .timeout(self.config.request_timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Http(describe(&e)))?;

        Ok(response.status().as_u16())
    }

    fn target(&self) -> &str {
        &self.config.base_url
    }
}
