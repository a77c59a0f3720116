use crate::config::ApiConfig;
use crate::error::{ApiError, ResetError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Path of the bulk reset endpoint, relative to the API base URL
pub const RESET_LETTERS_PATH: &str = "/api/ausbildung/reset-letters";

/// Counters reported by the server after a reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetStats {
    pub total_jobs: i64,
    pub jobs_with_letters_removed: i64,
    pub jobs_updated: i64,
    pub previously_pending: i64,
}

/// Body of a successful (HTTP 200) reset response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub stats: ResetStats,
}

/// The remote operation the reset session drives
#[async_trait::async_trait]
pub trait LetterResetApi: Send + Sync {
    /// Delete every motivation letter of the authenticated account and put
    /// the affected jobs back to pending. Issues exactly one request.
    async fn reset_letters(&self) -> Result<ResetResponse, ApiError>;
}

/// HTTP client for the Ausbildung reset endpoint
pub struct ResetClient {
    config: ApiConfig,
    endpoint: Url,
    http_client: reqwest::Client,
}

impl ResetClient {
    /// Create a client from validated API configuration
    pub fn new(config: ApiConfig) -> Result<Self, ResetError> {
        let endpoint = reset_endpoint(&config.base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("letter-reset/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            endpoint,
            http_client,
        })
    }

    /// Fully resolved URL the reset request is sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl LetterResetApi for ResetClient {
    async fn reset_letters(&self) -> Result<ResetResponse, ApiError> {
        debug!("Sending DELETE {}", self.endpoint);

        let response = self
            .http_client
            .delete(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(describe_request_error(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Reset request failed with status {status}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            ApiError::Transport(format!(
                "Failed to read response body: {}",
                describe_request_error(&e)
            ))
        })?;
        let reset = decode_reset_response(&body)?;

        info!(
            "Reset complete: {} jobs total, {} updated",
            reset.stats.total_jobs, reset.stats.jobs_updated
        );
        Ok(reset)
    }
}

/// Join the base URL and the reset path, tolerating a trailing slash on the base
pub fn reset_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        RESET_LETTERS_PATH
    ))
}

/// Parse a 200 body. Missing stats fields are a schema error, never zero.
pub fn decode_reset_response(body: &str) -> Result<ResetResponse, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

// reqwest's top-level message omits the cause (e.g. "Connection refused").
fn describe_request_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
