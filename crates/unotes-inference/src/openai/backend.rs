//! OpenAI-compatible chat backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use unotes_core::defaults::{GEN_TIMEOUT_SECS, HEALTH_TIMEOUT_SECS, OPENAI_URL};
use unotes_core::{ChatBackend, Error, ModelInvocation, Result};

use super::error::{to_unotes_error, UpstreamErrorCode};
use super::types::*;

pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_TIMEOUT: &str = "OPENAI_TIMEOUT";
pub const ENV_SKIP_TLS_VERIFY: &str = "OPENAI_SKIP_TLS_VERIFY";
pub const ENV_HTTP_REFERER: &str = "OPENAI_HTTP_REFERER";
pub const ENV_X_TITLE: &str = "OPENAI_X_TITLE";

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Skip TLS verification (for self-signed certs in local environments).
    pub skip_tls_verify: bool,
    /// HTTP-Referer header for OpenRouter.ai rankings (optional).
    pub http_referer: Option<String>,
    /// X-Title header for app name on OpenRouter.ai (optional).
    pub x_title: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_URL.to_string(),
            api_key: None,
            timeout_seconds: GEN_TIMEOUT_SECS,
            skip_tls_verify: false,
            http_referer: None,
            x_title: None,
        }
    }
}

impl OpenAIConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_BASE_URL).unwrap_or_else(|_| OPENAI_URL.to_string()),
            api_key: std::env::var(ENV_API_KEY).ok().filter(|k| !k.is_empty()),
            timeout_seconds: std::env::var(ENV_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(GEN_TIMEOUT_SECS),
            skip_tls_verify: std::env::var(ENV_SKIP_TLS_VERIFY)
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false),
            http_referer: std::env::var(ENV_HTTP_REFERER).ok(),
            x_title: std::env::var(ENV_X_TITLE).ok(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(Error::Config(format!("{} cannot be empty", ENV_BASE_URL)));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "{} must start with http:// or https://, got '{}'",
                ENV_BASE_URL, url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config(format!(
                "{} must be greater than zero",
                ENV_TIMEOUT
            )));
        }
        Ok(())
    }
}

/// OpenAI-compatible chat backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder =
            Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        if config.skip_tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            authenticated = config.api_key.is_some(),
            "Initializing OpenAI backend"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OpenAIConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Build a POST request with authentication and attribution headers.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.post(self.url(endpoint));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        // OpenRouter attribution headers
        if let Some(ref referer) = self.config.http_referer {
            req = req.header("HTTP-Referer", referer);
        }

        if let Some(ref title) = self.config.x_title {
            req = req.header("X-Title", title);
        }

        req.header("Content-Type", "application/json")
    }

    /// Build a GET request with authentication.
    fn build_get_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(self.url(endpoint));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req
    }

    /// Map a non-success response to an upstream error.
    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let (error_type, error_code, message) =
            match serde_json::from_str::<OpenAIErrorResponse>(&body) {
                Ok(parsed) => (
                    parsed.error.error_type.unwrap_or_default(),
                    parsed.error.code,
                    parsed.error.message,
                ),
                Err(_) if body.trim().is_empty() => {
                    (String::new(), None, "Unknown error".to_string())
                }
                Err(_) => (String::new(), None, body),
            };

        let code = UpstreamErrorCode::from_response(
            status.as_u16(),
            &error_type,
            error_code.as_deref(),
        );
        warn!(
            status = status.as_u16(),
            ?code,
            retryable = code.is_retryable(),
            "OpenAI request failed"
        );

        to_unotes_error(code, &format!("OpenAI returned {}: {}", status, message))
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    #[instrument(skip(self, invocation), fields(subsystem = "inference", component = "openai", op = "complete", model = %invocation.model, variant = %invocation.variant))]
    async fn complete(&self, invocation: &ModelInvocation) -> Result<String> {
        let start = Instant::now();
        let request = ChatCompletionRequest::from(invocation);

        debug!(
            messages = request.messages.len(),
            prompt_len = invocation.system.len(),
            max_tokens = invocation.params.max_tokens,
            "Sending chat completion"
        );

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::UpstreamInvocation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            Error::UpstreamInvocation(format!("Failed to parse response: {}", e))
        })?;

        let choice = result.choices.into_iter().next().ok_or_else(|| {
            Error::UpstreamInvocation("Response contained no choices".to_string())
        })?;

        let content = choice.message.content.ok_or_else(|| {
            Error::UpstreamInvocation(format!(
                "Response contained no content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        debug!(
            response_len = content.len(),
            total_tokens = result.usage.as_ref().map(|u| u.total_tokens),
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat completion finished"
        );
        Ok(content)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .build_get_request("/models")
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                debug!("OpenAI health check passed");
                Ok(true)
            }
            Ok(resp) => {
                warn!(status = resp.status().as_u16(), "OpenAI health check failed");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "OpenAI health check error");
                Ok(false)
            }
        }
    }

    fn backend_name(&self) -> &str {
        "openai"
    }
}
