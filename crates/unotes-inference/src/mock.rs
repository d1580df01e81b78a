//! Mock chat backend for deterministic testing.
//!
//! Records every invocation it receives and answers with a fixed response, a
//! fixed failure, or an optional simulated latency.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use unotes_inference::mock::MockChatBackend;
//!
//! let backend = MockChatBackend::new().with_fixed_response("Test response");
//! assert_eq!(backend.call_count(), 0);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use unotes_core::{ChatBackend, Error, ModelInvocation, Result};

#[derive(Debug, Clone)]
struct MockConfig {
    response: String,
    failure: Option<String>,
    healthy: bool,
    latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            response: "Mock response".to_string(),
            failure: None,
            healthy: true,
            latency_ms: 0,
        }
    }
}

/// Mock chat backend for testing.
#[derive(Clone, Default)]
pub struct MockChatBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<ModelInvocation>>>,
}

impl MockChatBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned by every call.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).response = response.into();
        self
    }

    /// Make every call fail with an upstream error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Result reported by `health_check`.
    pub fn with_health(mut self, healthy: bool) -> Self {
        Arc::make_mut(&mut self.config).healthy = healthy;
        self
    }

    /// Set simulated latency for every call.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// All invocations received so far, in call order.
    pub fn calls(&self) -> Vec<ModelInvocation> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, invocation: &ModelInvocation) -> Result<String> {
        self.call_log.lock().unwrap().push(invocation.clone());

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        match &self.config.failure {
            Some(message) => Err(Error::UpstreamInvocation(message.clone())),
            None => Ok(self.config.response.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.healthy)
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unotes_core::{GenerationParams, Message, ModelVariant};

    fn invocation() -> ModelInvocation {
        ModelInvocation {
            system: "sys".into(),
            messages: vec![Message::user_text("hi")],
            variant: ModelVariant::Text,
            model: "m".into(),
            params: GenerationParams {
                max_tokens: 10,
                temperature: 0.5,
            },
        }
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let backend = MockChatBackend::new().with_fixed_response("Custom response");
        assert_eq!(backend.complete(&invocation()).await.unwrap(), "Custom response");
    }

    #[tokio::test]
    async fn test_mock_call_logging() {
        let backend = MockChatBackend::new();
        backend.complete(&invocation()).await.unwrap();
        backend.complete(&invocation()).await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.calls()[0], invocation());

        backend.clear_calls();
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_failure_is_upstream_error() {
        let backend = MockChatBackend::new().with_failure("boom");
        let err = backend.complete(&invocation()).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamInvocation(m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_mock_health() {
        assert!(MockChatBackend::new().health_check().await.unwrap());
        assert!(!MockChatBackend::new()
            .with_health(false)
            .health_check()
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_mock_latency_simulation() {
        let backend = MockChatBackend::new().with_latency_ms(30);
        let start = std::time::Instant::now();
        backend.complete(&invocation()).await.unwrap();
        assert!(start.elapsed().as_millis() >= 30, "Should simulate latency");
    }
}
