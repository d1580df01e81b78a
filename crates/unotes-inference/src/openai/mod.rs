//! OpenAI-compatible chat backend.
//!
//! Works with any endpoint that speaks the chat completions protocol and
//! accepts image content parts:
//!
//! - OpenAI cloud API
//! - Azure OpenAI
//! - OpenRouter (with `HTTP-Referer` / `X-Title` attribution)
//! - vLLM / LM Studio serving a vision model
//!
//! # Example
//!
//! ```rust,no_run
//! use unotes_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! // From environment variables
//! let backend = OpenAIBackend::from_env().unwrap();
//!
//! // Or with custom config
//! let config = OpenAIConfig {
//!     base_url: "http://localhost:1234/v1".to_string(),
//!     api_key: None,
//!     timeout_seconds: 120,
//!     ..Default::default()
//! };
//! let backend = OpenAIBackend::new(config).unwrap();
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    OpenAIBackend, OpenAIConfig, ENV_API_KEY, ENV_BASE_URL, ENV_HTTP_REFERER,
    ENV_SKIP_TLS_VERIFY, ENV_TIMEOUT, ENV_X_TITLE,
};
pub use error::{to_unotes_error, UpstreamErrorCode};
pub use types::*;
