//! Core traits for pluggable backends.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ModelInvocation;

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend that executes one fully assembled chat completion.
///
/// Implementations issue exactly one outbound call per `complete` and surface
/// any failure as [`crate::Error::UpstreamInvocation`] without retrying.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run the invocation and return the model's raw text.
    async fn complete(&self, invocation: &ModelInvocation) -> Result<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Short backend name for logs ("openai", "mock").
    fn backend_name(&self) -> &str;
}
